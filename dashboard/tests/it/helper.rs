use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use dashboard::token::AccessToken;
use serde_json::json;

/// An unsigned token the dashboard will happily decode; signatures are never
/// verified client-side.
pub fn make_token(role: &str, user_id: &str) -> AccessToken {
    make_token_with_exp(role, user_id, 4_000_000_000)
}

pub fn make_token_with_exp(role: &str, user_id: &str, exp: i64) -> AccessToken {
    let header = URL_SAFE_NO_PAD.encode(json!({"alg": "HS256", "typ": "JWT"}).to_string());
    let claims = URL_SAFE_NO_PAD.encode(
        json!({
            "email": "info@gmail.com",
            "exp": exp,
            "role": role,
            "user_id": user_id,
        })
        .to_string(),
    );

    AccessToken::new(format!("{header}.{claims}.unverified-signature"))
}
