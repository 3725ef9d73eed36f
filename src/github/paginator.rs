use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::client::ensure_success;
use crate::github::rate_limit::RateLimitStatus;

pub struct Paginator<'a> {
    client: &'a Client,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Walk `page=1,2,..` at a fixed page size until an empty or short page.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        per_page: u32,
    ) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut page = 1u32;

        loop {
            tracing::debug!("Fetching: {} (page {})", url, page);
            let response = self
                .client
                .get(url)
                .query(query)
                .query(&[("per_page", per_page), ("page", page)])
                .send()
                .await?;
            RateLimitStatus::from_headers(response.headers()).observe(url);

            let response = ensure_success(response, url).await?;
            let items: Vec<T> = response.json().await?;
            let items_count = items.len();
            all_items.extend(items);

            if items_count < per_page as usize {
                break;
            }

            page += 1;
        }

        Ok(all_items)
    }
}

/// Page number of the `rel="last"` link in a `Link` header.
///
/// With `per_page=1` this is the total number of items.
pub fn last_page_from_link(link: &str) -> Option<u32> {
    link.split(',')
        .find(|part| part.contains("rel=\"last\""))
        .and_then(|part| {
            let start = part.find('<')? + 1;
            let end = part.find('>')?;
            part.get(start..end)
        })
        .and_then(|url| url.split_once('?').map(|(_, query)| query))
        .and_then(|query| {
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| *key == "page")
                .and_then(|(_, value)| value.parse().ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_from_link() {
        let link = r#"<https://api.github.com/repositories/1/contributors?per_page=1&anon=false&page=2>; rel="next", <https://api.github.com/repositories/1/contributors?per_page=1&anon=false&page=137>; rel="last""#;
        assert_eq!(last_page_from_link(link), Some(137));
    }

    #[test]
    fn test_per_page_is_not_mistaken_for_page() {
        let link = r#"<https://api.github.com/x?page=9&per_page=1>; rel="last""#;
        assert_eq!(last_page_from_link(link), Some(9));
    }

    #[test]
    fn test_link_without_last() {
        let link = r#"<https://api.github.com/x?page=1>; rel="prev""#;
        assert_eq!(last_page_from_link(link), None);
        assert_eq!(last_page_from_link(""), None);
    }
}
