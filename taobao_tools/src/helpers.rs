use hmac::{Hmac, Mac};
use md5::Md5;

type HmacMd5 = Hmac<Md5>;

/// The timestamp format the Taobao Open Platform uses everywhere: request timestamps, query window
/// bounds and the `pay_time` field on trade records.
pub const TAOBAO_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Signs a parameter set according to the Taobao Open Platform HMAC rules.
///
/// Parameters are sorted by key, concatenated as `secret + k1v1k2v2... + secret`, and the HMAC-MD5
/// digest of that string (keyed with the app secret) is returned as an uppercase hex string.
pub fn sign_params(secret: &str, params: &[(String, String)]) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    let mut payload = String::from(secret);
    for (key, value) in &sorted {
        payload.push_str(key);
        payload.push_str(value);
    }
    payload.push_str(secret);
    let mut mac = HmacMd5::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(payload.as_bytes());
    hex::encode_upper(mac.finalize().into_bytes())
}
