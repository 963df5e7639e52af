use crate::common::{TestApp, routes};

mod transitions {
    use super::*;

    #[tokio::test]
    async fn approve_stamps_approved_at() {
        let app = TestApp::spawn().await;
        app.login_admin().await;
        let (id, _) = app.upload_photo_ok("cat.jpg", "Hi!").await;

        let res = app.post_empty(&routes::approve(id)).await;

        assert_eq!(res.status, 200, "Approve failed: {}", res.text);
        assert_eq!(res.body["status"].as_str().unwrap(), "approved");
        assert!(res.body["approved_at"].is_string());
    }

    #[tokio::test]
    async fn reject_after_approve_clears_approved_at() {
        let app = TestApp::spawn().await;
        app.login_admin().await;
        let (id, _) = app.upload_photo_ok("cat.jpg", "Hi!").await;

        let res = app.post_empty(&routes::approve(id)).await;
        assert_eq!(res.status, 200);
        assert!(res.body["approved_at"].is_string());

        let res = app.post_empty(&routes::reject(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"].as_str().unwrap(), "rejected");
        assert!(res.body["approved_at"].is_null());
    }

    #[tokio::test]
    async fn reset_to_pending_works_from_any_status() {
        let app = TestApp::spawn().await;
        app.login_admin().await;
        let (id, _) = app.upload_photo_ok("cat.jpg", "Hi!").await;

        for transition in [routes::approve(id), routes::reject(id)] {
            let res = app.post_empty(&transition).await;
            assert_eq!(res.status, 200);

            let res = app.post_empty(&routes::pending(id)).await;
            assert_eq!(res.status, 200);
            assert_eq!(res.body["status"].as_str().unwrap(), "pending");
            assert!(res.body["approved_at"].is_null());
        }
    }

    #[tokio::test]
    async fn every_transition_upholds_the_approved_at_invariant() {
        let app = TestApp::spawn().await;
        app.login_admin().await;
        let (id, _) = app.upload_photo_ok("cat.jpg", "Hi!").await;

        for transition in [
            routes::approve(id),
            routes::pending(id),
            routes::reject(id),
            routes::approve(id),
            routes::reject(id),
        ] {
            let res = app.post_empty(&transition).await;
            assert_eq!(res.status, 200, "Transition failed: {}", res.text);

            let approved = res.body["status"].as_str().unwrap() == "approved";
            assert_eq!(
                approved,
                res.body["approved_at"].is_string(),
                "invariant violated: {}",
                res.text
            );
        }
    }

    #[tokio::test]
    async fn transitions_on_a_missing_photo_are_not_found() {
        let app = TestApp::spawn().await;
        app.login_admin().await;

        for path in [routes::approve(999), routes::reject(999), routes::pending(999)] {
            let res = app.post_empty(&path).await;
            assert_eq!(res.status, 404);
            assert_eq!(res.body["code"].as_str().unwrap(), "NOT_FOUND");
        }
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn delete_removes_record_and_blob() {
        let app = TestApp::spawn().await;
        app.login_admin().await;
        let (id, filename) = app.upload_photo_ok("cat.jpg", "Hi!").await;

        let res = app.delete(&routes::photo(id)).await;

        assert_eq!(res.status, 204);
        assert_eq!(app.photo_count().await, 0);
        assert!(!app.store.contains(&filename).await);
    }

    #[tokio::test]
    async fn delete_removes_record_even_when_blob_delete_fails() {
        let app = TestApp::spawn().await;
        app.login_admin().await;
        let (id, filename) = app.upload_photo_ok("cat.jpg", "Hi!").await;

        app.store.set_fail_deletes(true);
        let res = app.delete(&routes::photo(id)).await;

        assert_eq!(res.status, 204);
        assert_eq!(app.photo_count().await, 0);
        // The blob is orphaned, which the contract accepts.
        assert!(app.store.contains(&filename).await);
    }

    #[tokio::test]
    async fn delete_of_a_missing_photo_is_not_found() {
        let app = TestApp::spawn().await;
        app.login_admin().await;

        let res = app.delete(&routes::photo(999)).await;
        assert_eq!(res.status, 404);
    }
}

mod authorization {
    use super::*;

    #[tokio::test]
    async fn mutating_operations_require_a_session() {
        let app = TestApp::spawn().await;
        let (id, _) = app.upload_photo_ok("cat.jpg", "Hi!").await;

        for path in [routes::approve(id), routes::reject(id), routes::pending(id)] {
            let res = app.post_empty(&path).await;
            assert_eq!(res.status, 401, "{path} was not gated");
            assert_eq!(res.body["code"].as_str().unwrap(), "UNAUTHORIZED");
        }

        let res = app.delete(&routes::photo(id)).await;
        assert_eq!(res.status, 401);

        // The same operations succeed once authenticated.
        app.login_admin().await;
        for path in [routes::approve(id), routes::reject(id), routes::pending(id)] {
            let res = app.post_empty(&path).await;
            assert_eq!(res.status, 200, "{path} failed: {}", res.text);
        }

        let res = app.delete(&routes::photo(id)).await;
        assert_eq!(res.status, 204);
    }
}
