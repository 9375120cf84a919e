//! Registry test utilities

use mockito::{Mock, Server, ServerGuard};
use serde_json::{Map, Value, json};
use url::Url;

use npm_gateway::gateway::NpmGateway;

pub const TOKEN: &str = "test-token";

/// mockito-backed npm registry serving metadata and tarballs
pub struct MockRegistry {
    server: ServerGuard,
    mocks: Vec<Mock>,
}

impl MockRegistry {
    pub async fn start() -> Self {
        Self {
            server: Server::new_async().await,
            mocks: Vec::new(),
        }
    }

    pub fn url(&self) -> String {
        self.server.url()
    }

    /// Location the registry serves a version's tarball from
    pub fn tarball_url(&self, package: &str, version: &str) -> String {
        let file = package.rsplit('/').next().unwrap_or(package);
        format!("{}/{}/-/{}-{}.tgz", self.url(), package, file, version)
    }

    /// Contents of the tarball served for a version
    pub fn tarball_body(package: &str, version: &str) -> String {
        format!("{}@{}", package, version)
    }

    /// Register a package whose metadata lists `versions`, each with a tarball on this server
    pub async fn with_package(mut self, package: &str, versions: &[&str]) -> Self {
        let mut entries = Map::new();
        for version in versions {
            entries.insert(
                version.to_string(),
                json!({ "dist": { "tarball": self.tarball_url(package, version) } }),
            );

            let path = Url::parse(&self.tarball_url(package, version))
                .unwrap()
                .path()
                .to_string();
            let mock = self
                .server
                .mock("GET", path.as_str())
                .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
                .with_status(200)
                .with_header("content-type", "application/octet-stream")
                .with_body(Self::tarball_body(package, version))
                .create_async()
                .await;
            self.mocks.push(mock);
        }

        let metadata = json!({ "name": package, "versions": Value::Object(entries) });
        self.with_metadata(package, &metadata.to_string()).await
    }

    /// Register a raw metadata document for a package
    pub async fn with_metadata(mut self, package: &str, body: &str) -> Self {
        let path = NpmGateway::new(
            reqwest::Client::new(),
            Url::parse(&self.url()).unwrap(),
            TOKEN,
        )
        .unwrap()
        .package_url(package)
        .path()
        .to_string();

        let mock = self
            .server
            .mock("GET", path.as_str())
            .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;
        self.mocks.push(mock);
        self
    }

    /// Gateway talking to this registry with the expected credential
    pub fn gateway(&self) -> NpmGateway {
        self.gateway_with_token(TOKEN)
    }

    pub fn gateway_with_token(&self, token: &str) -> NpmGateway {
        NpmGateway::new(
            reqwest::Client::new(),
            Url::parse(&self.url()).unwrap(),
            token,
        )
        .unwrap()
    }
}
