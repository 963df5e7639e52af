use crate::config::PushoverConfig;

/// Best-effort Pushover alert on successful uploads.
///
/// Fire-and-forget: dispatch happens on a spawned task off the response
/// path, and every failure mode is logged and swallowed. An unconfigured
/// notifier is a silent no-op.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    config: Option<PushoverConfig>,
}

impl Notifier {
    pub fn new(config: Option<PushoverConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Announce a freshly uploaded photo to the admin.
    pub fn photo_uploaded(&self, caption: &str) {
        let Some(config) = self.config.clone() else {
            tracing::debug!("Pushover not configured, skipping notification");
            return;
        };

        let client = self.client.clone();
        let caption: String = caption.chars().take(100).collect();

        tokio::spawn(async move {
            let mut params: Vec<(&str, String)> = vec![
                ("token", config.app_token),
                ("user", config.user_key),
                ("message", format!("Caption: \"{caption}\"")),
                ("title", "New Photo Uploaded".into()),
                ("priority", "0".into()),
            ];
            if let Some(url) = config.dashboard_url {
                params.push(("url", url));
                params.push(("url_title", "Open Admin Dashboard".into()));
            }

            match client.post(&config.api_url).form(&params).send().await {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!("Pushover notification sent");
                }
                Ok(response) => {
                    tracing::warn!(status = %response.status(), "Pushover notification failed");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Pushover notification failed");
                }
            }
        });
    }
}
