use crate::error::NagError;
use actix_web::HttpRequest;
use nag_scheduler_infra::NagContext;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Only lets through requests that carry the admin api key
/// from the `Config` in the `x-api-key` header
pub fn protect_admin_route(req: &HttpRequest, ctx: &NagContext) -> Result<(), NagError> {
    let api_key = match req.headers().get(API_KEY_HEADER) {
        Some(api_key) => match api_key.to_str() {
            Ok(api_key) => api_key,
            Err(_) => {
                return Err(NagError::Unauthorized(
                    "Malformed api key provided".to_string(),
                ))
            }
        },
        None => {
            return Err(NagError::Unauthorized(format!(
                "Unable to find api-key in {} header",
                API_KEY_HEADER
            )))
        }
    };

    if !keys_match(api_key.as_bytes(), ctx.config.admin_api_key.as_bytes()) {
        return Err(NagError::Unauthorized(format!(
            "Invalid api-key provided in {} header",
            API_KEY_HEADER
        )));
    }

    Ok(())
}

/// Compares without returning early on the first differing byte
fn keys_match(provided: &[u8], expected: &[u8]) -> bool {
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;

    fn setup_ctx() -> NagContext {
        let mut ctx = NagContext::create_inmemory();
        ctx.config.admin_api_key = "admin-key".into();
        ctx
    }

    #[test]
    fn accepts_admin_api_key() {
        let ctx = setup_ctx();
        let req = TestRequest::default()
            .insert_header((API_KEY_HEADER, "admin-key"))
            .to_http_request();
        assert!(protect_admin_route(&req, &ctx).is_ok());
    }

    #[test]
    fn rejects_missing_api_key() {
        let ctx = setup_ctx();
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            protect_admin_route(&req, &ctx),
            Err(NagError::Unauthorized(_))
        ));
    }

    #[test]
    fn rejects_invalid_api_key() {
        let ctx = setup_ctx();
        for key in &["admin-kez", "admin", "admin-key-2", ""] {
            let req = TestRequest::default()
                .insert_header((API_KEY_HEADER, *key))
                .to_http_request();
            assert!(matches!(
                protect_admin_route(&req, &ctx),
                Err(NagError::Unauthorized(_))
            ));
        }
    }
}
