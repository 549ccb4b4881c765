use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use crate::model::config::StatsConfig;
use crate::ops::stats::{
    RepoMetadata, RepoStats, RepoStatsSource, StatsError, StatsRequest, StatsUpdate,
};

/// Repository metadata API client (GitHub REST shape)
pub struct GithubClient {
    http: Client,
    api_base: String,
}

impl GithubClient {
    pub fn new(config: &StatsConfig) -> Result<Self, StatsError> {
        Self::from_builder(client_builder(config), config)
    }

    fn from_builder(
        builder: reqwest::blocking::ClientBuilder,
        config: &StatsConfig,
    ) -> Result<Self, StatsError> {
        let http = builder
            .build()
            .map_err(|e| StatsError::Network(e.to_string()))?;
        Ok(GithubClient {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, owner: &str, repo: &str) -> String {
        format!("{}/repos/{}/{}", self.api_base, owner, repo)
    }
}

fn client_builder(config: &StatsConfig) -> reqwest::blocking::ClientBuilder {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("folio/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );
    Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
}

impl RepoStatsSource for GithubClient {
    fn fetch(&self, owner: &str, repo: &str) -> Result<RepoStats, StatsError> {
        let response = self
            .http
            .get(self.repo_url(owner, repo))
            .send()
            .map_err(|e| StatsError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Status(status.as_u16()));
        }
        let meta: RepoMetadata = response
            .json()
            .map_err(|e| StatsError::Parse(e.to_string()))?;
        Ok(meta.into())
    }
}

/// Receives stats lookups running in the background.
///
/// Each request runs on its own thread; results arrive in completion order.
/// Dropping the feed makes late results a no-op.
pub struct StatsFeed {
    rx: mpsc::Receiver<StatsUpdate>,
}

impl StatsFeed {
    /// Start one background lookup per request.
    pub fn start(source: Arc<dyn RepoStatsSource>, requests: Vec<StatsRequest>) -> Self {
        let (tx, rx) = mpsc::channel();
        for request in requests {
            let tx = tx.clone();
            let source = Arc::clone(&source);
            tracing::debug!(owner = %request.owner, repo = %request.repo, "fetching repo stats");
            thread::spawn(move || {
                let result = source.fetch(&request.owner, &request.repo);
                let _ = tx.send(StatsUpdate {
                    project_index: request.project_index,
                    result,
                });
            });
        }
        StatsFeed { rx }
    }

    /// A feed that never yields anything
    pub fn idle() -> Self {
        let (_tx, rx) = mpsc::channel();
        StatsFeed { rx }
    }

    /// Non-blocking poll for finished lookups.
    pub fn poll(&self) -> Vec<StatsUpdate> {
        let mut updates = Vec::new();
        while let Ok(update) = self.rx.try_recv() {
            updates.push(update);
        }
        updates
    }
}

/// Run every request to completion on the calling thread.
pub fn fetch_all(source: &dyn RepoStatsSource, requests: &[StatsRequest]) -> Vec<StatsUpdate> {
    requests
        .iter()
        .map(|request| StatsUpdate {
            project_index: request.project_index,
            result: source.fetch(&request.owner, &request.repo),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Serve exactly one HTTP response on a loopback port, returning the base
    /// URL and a handle yielding the request line.
    fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            let request = String::from_utf8_lossy(&buf).to_string();
            request.lines().next().unwrap_or_default().to_string()
        });
        (format!("http://{}", addr), handle)
    }

    fn client_for(base: &str) -> GithubClient {
        let config = StatsConfig {
            account_name: "octo".into(),
            api_base: base.to_string(),
            timeout_secs: 5,
            ..Default::default()
        };
        // Loopback must not go through any proxy from the environment.
        GithubClient::from_builder(client_builder(&config).no_proxy(), &config).unwrap()
    }

    #[test]
    fn success_returns_counts_and_uses_repo_path() {
        let (base, server) = serve_once("200 OK", r#"{"stargazers_count":5,"forks_count":2}"#);
        let stats = client_for(&base).fetch("octo", "widgets").unwrap();
        assert_eq!(stats, RepoStats { stars: 5, forks: 2 });
        assert_eq!(server.join().unwrap(), "GET /repos/octo/widgets HTTP/1.1");
    }

    #[test]
    fn non_success_status_is_error() {
        let (base, server) = serve_once("404 Not Found", r#"{"message":"Not Found"}"#);
        let err = client_for(&base).fetch("octo", "missing").unwrap_err();
        assert!(matches!(err, StatsError::Status(404)));
        server.join().unwrap();
    }

    #[test]
    fn unparseable_body_is_error() {
        let (base, server) = serve_once("200 OK", "<html>rate limited</html>");
        let err = client_for(&base).fetch("octo", "widgets").unwrap_err();
        assert!(matches!(err, StatsError::Parse(_)));
        server.join().unwrap();
    }

    #[test]
    fn connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let err = client_for(&format!("http://{}", addr))
            .fetch("octo", "widgets")
            .unwrap_err();
        assert!(matches!(err, StatsError::Network(_)));
    }

    struct FixedSource;

    impl RepoStatsSource for FixedSource {
        fn fetch(&self, _owner: &str, repo: &str) -> Result<RepoStats, StatsError> {
            match repo {
                "ok" => Ok(RepoStats { stars: 7, forks: 1 }),
                _ => Err(StatsError::Status(500)),
            }
        }
    }

    fn request(index: usize, repo: &str) -> StatsRequest {
        StatsRequest {
            project_index: index,
            owner: "octo".into(),
            repo: repo.into(),
        }
    }

    #[test]
    fn feed_delivers_every_result() {
        let requests = vec![request(0, "ok"), request(3, "bad")];
        let feed = StatsFeed::start(Arc::new(FixedSource), requests);
        let mut updates = Vec::new();
        while updates.len() < 2 {
            let update = feed
                .rx
                .recv_timeout(Duration::from_secs(5))
                .expect("lookup result");
            updates.push(update);
        }
        updates.sort_by_key(|u| u.project_index);
        assert_eq!(updates[0].result.as_ref().unwrap().stars, 7);
        assert!(updates[1].result.is_err());
        assert!(feed.poll().is_empty());
    }

    #[test]
    fn idle_feed_is_empty() {
        assert!(StatsFeed::idle().poll().is_empty());
    }

    #[test]
    fn fetch_all_runs_in_order() {
        let updates = fetch_all(&FixedSource, &[request(1, "bad"), request(2, "ok")]);
        let idx: Vec<usize> = updates.iter().map(|u| u.project_index).collect();
        assert_eq!(idx, vec![1, 2]);
        assert!(updates[1].result.is_ok());
    }
}
