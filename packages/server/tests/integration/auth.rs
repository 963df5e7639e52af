use crate::common::{TestApp, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn correct_password_starts_a_session() {
        let app = TestApp::spawn().await;

        app.login_admin().await;

        let res = app.get(routes::SESSION).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["authenticated"], true);
    }

    #[tokio::test]
    async fn wrong_password_is_a_generic_denial() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json(routes::LOGIN, &serde_json::json!({ "password": "nope" }))
            .await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"].as_str().unwrap(), "INVALID_CREDENTIALS");

        let res = app.get(routes::SESSION).await;
        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn empty_password_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json(routes::LOGIN, &serde_json::json!({ "password": "" }))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"].as_str().unwrap(), "VALIDATION_ERROR");
    }
}

mod logout {
    use super::*;

    #[tokio::test]
    async fn logout_revokes_the_session() {
        let app = TestApp::spawn().await;
        app.login_admin().await;

        // Authenticated: a missing photo is a 404, not a 401.
        let res = app.post_empty(&routes::approve(999)).await;
        assert_eq!(res.status, 404);

        let res = app.post_empty(routes::LOGOUT).await;
        assert_eq!(res.status, 204);

        let res = app.get(routes::SESSION).await;
        assert_eq!(res.status, 401);

        let res = app.post_empty(&routes::approve(999)).await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"].as_str().unwrap(), "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn logout_without_a_session_is_a_no_op() {
        let app = TestApp::spawn().await;

        let res = app.post_empty(routes::LOGOUT).await;
        assert_eq!(res.status, 204);
    }
}
