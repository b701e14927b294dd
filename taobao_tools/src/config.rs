use log::*;
use tms_common::Secret;

pub const TAOBAO_API_URL: &str = "https://eco.taobao.com/router/rest";
pub const TAOBAO_SANDBOX_API_URL: &str = "https://gw.api.tbsandbox.com/router/rest";

#[derive(Debug, Clone, Default)]
pub struct TaobaoConfig {
    pub app_key: String,
    pub app_secret: Secret<String>,
    pub api_url: String,
}

impl TaobaoConfig {
    pub fn new<S: Into<String>>(app_key: S, app_secret: Secret<String>, sandbox: bool) -> Self {
        let api_url = if sandbox { TAOBAO_SANDBOX_API_URL } else { TAOBAO_API_URL };
        Self { app_key: app_key.into(), app_secret, api_url: api_url.into() }
    }

    pub fn new_from_env_or_default() -> Self {
        let app_key = std::env::var("TMS_TAOBAO_APP_KEY").unwrap_or_else(|_| {
            warn!("TMS_TAOBAO_APP_KEY not set, using (probably useless) default");
            "00000000".to_string()
        });
        let app_secret = Secret::new(std::env::var("TMS_TAOBAO_APP_SECRET").unwrap_or_else(|_| {
            warn!("TMS_TAOBAO_APP_SECRET not set, using (probably useless) default");
            "00000000000000".to_string()
        }));
        let sandbox = std::env::var("TMS_TAOBAO_SANDBOX").map(|v| v == "1" || v.to_lowercase() == "true").unwrap_or(false);
        Self::new(app_key, app_secret, sandbox)
    }
}
