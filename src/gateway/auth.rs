//! Request authorization

use reqwest::RequestBuilder;

/// Returns the request with `Authorization: Bearer <credential>` attached
///
/// The header is marked sensitive so it is redacted from debug output.
pub fn authorize(request: RequestBuilder, credential: &str) -> RequestBuilder {
    request.bearer_auth(credential)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorize_adds_bearer_header() {
        let client = reqwest::Client::new();
        let request = authorize(client.get("https://registry.example.com/pkg"), "s3cr3t")
            .build()
            .unwrap();

        let header = request.headers().get(reqwest::header::AUTHORIZATION).unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer s3cr3t");
        assert!(header.is_sensitive());
    }

    #[test]
    fn authorize_keeps_existing_headers() {
        let client = reqwest::Client::new();
        let request = authorize(
            client
                .get("https://registry.example.com/pkg")
                .header(reqwest::header::ACCEPT, "application/json"),
            "token",
        )
        .build()
        .unwrap();

        assert_eq!(
            request.headers()[reqwest::header::ACCEPT],
            "application/json"
        );
        assert_eq!(
            request.headers()[reqwest::header::AUTHORIZATION],
            "Bearer token"
        );
    }
}
