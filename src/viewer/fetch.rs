use log::trace;
use reqwest::blocking::Client;
use reqwest::Url;
use std::fs;

use crate::error::{GameError, GameResult};

pub trait ResourceFetcher {
    /// Text of the resource at `location`. Failures are `GameError::ResourceLoad`.
    fn fetch(&self, location: &str) -> GameResult<String>;
}

/// Fetches `http(s)://` locations over the network and reads everything else
/// from the filesystem. No retries.
pub struct DefaultFetcher {
    client: Client,
}

impl DefaultFetcher {
    pub fn new() -> GameResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|err| GameError::ResourceLoad(err.to_string()))?;
        Ok(Self { client })
    }

    fn fetch_remote(&self, url: &str) -> GameResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| GameError::ResourceLoad(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or(status.as_str());
            return Err(GameError::ResourceLoad(format!("Error loading file: {}", reason)));
        }
        response
            .text()
            .map_err(|err| GameError::ResourceLoad(err.to_string()))
    }
}

impl ResourceFetcher for DefaultFetcher {
    fn fetch(&self, location: &str) -> GameResult<String> {
        trace!(target: "viewer", "Fetching {}", location);
        if is_remote(location) {
            self.fetch_remote(location)
        } else {
            fs::read_to_string(location)
                .map_err(|err| GameError::ResourceLoad(format!("{}: {}", location, err)))
        }
    }
}

pub fn is_remote(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolves the `md` query parameter of `page_url` against the page itself.
/// `Ok(None)` when the page has no such parameter.
pub fn md_location_from_page(page_url: &str) -> GameResult<Option<String>> {
    let page = Url::parse(page_url).map_err(|err| GameError::ResourceLoad(err.to_string()))?;
    let Some((_, md_path)) = page.query_pairs().find(|(key, _)| key == "md") else {
        return Ok(None);
    };
    let resolved = page
        .join(&md_path)
        .map_err(|err| GameError::ResourceLoad(err.to_string()))?;

    if resolved.scheme() == "file" {
        let path = resolved
            .to_file_path()
            .map_err(|_| GameError::ResourceLoad(format!("Not a local path: {}", resolved)))?;
        return Ok(Some(path.to_string_lossy().into_owned()));
    }
    Ok(Some(resolved.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves exactly one request with `response` and returns its URL.
    fn serve_once(response: &'static str) -> (String, thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/notes.md", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request).unwrap();
            stream.write_all(response.as_bytes()).unwrap();
        });
        (url, handle)
    }

    #[test]
    fn test_fetches_remote_markdown() {
        let (url, handle) = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 4\r\nConnection: close\r\n\r\n# hi",
        );
        let fetcher = DefaultFetcher::new().unwrap();
        assert_eq!(fetcher.fetch(&url).unwrap(), "# hi");
        handle.join().unwrap();
    }

    #[test]
    fn test_remote_error_status_reports_reason() {
        let (url, handle) = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        let fetcher = DefaultFetcher::new().unwrap();
        let err = fetcher.fetch(&url).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not load markdown file: Error loading file: Not Found"
        );
        handle.join().unwrap();
    }

    #[test]
    fn test_refused_connection_is_resource_load_error() {
        let url = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}/notes.md", listener.local_addr().unwrap())
        };
        let fetcher = DefaultFetcher::new().unwrap();
        assert!(matches!(
            fetcher.fetch(&url),
            Err(GameError::ResourceLoad(_))
        ));
    }

    #[test]
    fn test_reads_local_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# Title").unwrap();
        let fetcher = DefaultFetcher::new().unwrap();
        let text = fetcher.fetch(file.path().to_str().unwrap()).unwrap();
        assert_eq!(text, "# Title");
    }

    #[test]
    fn test_missing_local_file_is_resource_load_error() {
        let fetcher = DefaultFetcher::new().unwrap();
        assert!(matches!(
            fetcher.fetch("/definitely/not/here.md"),
            Err(GameError::ResourceLoad(_))
        ));
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/a.md"));
        assert!(is_remote("HTTP://example.com/a.md"));
        assert!(!is_remote("docs/a.md"));
    }

    #[test]
    fn test_md_location_from_page() {
        assert_eq!(
            md_location_from_page("https://example.com/day3/index.html?md=notes/intro.md").unwrap(),
            Some("https://example.com/day3/notes/intro.md".to_string())
        );
        assert_eq!(md_location_from_page("https://example.com/index.html").unwrap(), None);
        assert!(md_location_from_page("not a url").is_err());
    }

    #[test]
    fn test_md_location_from_file_page() {
        assert_eq!(
            md_location_from_page("file:///srv/site/index.html?md=README.md").unwrap(),
            Some("/srv/site/README.md".to_string())
        );
    }
}
