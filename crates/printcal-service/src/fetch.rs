//! Remote calendar retrieval with an optional proxy fallback.

use printcal_core::config::FetchConfig;
use reqwest::{Client, Url};

use crate::error::{FetchError, FetchResult};

/// ## Summary
/// Builds the HTTP client used for calendar fetches.
///
/// ## Errors
/// Returns `FetchError::Http` if the client cannot be constructed.
pub fn build_client(config: &FetchConfig) -> FetchResult<Client> {
    Ok(Client::builder()
        .timeout(config.timeout())
        .user_agent(concat!("printcal/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// ## Summary
/// Parses a calendar URL, mapping `webcal://` to `https://`.
///
/// ## Errors
/// Returns `FetchError::InvalidUrl` unless the result is an http(s) URL.
pub fn parse_target(url: &str) -> FetchResult<Url> {
    let trimmed = url.trim();
    let normalized = match trimmed.get(..9) {
        Some(scheme) if scheme.eq_ignore_ascii_case("webcal://") => {
            format!("https://{}", &trimmed[9..])
        }
        _ => trimmed.to_string(),
    };

    let parsed =
        Url::parse(&normalized).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl(format!(
            "{url}: unsupported scheme {other}"
        ))),
    }
}

/// ## Summary
/// Builds the proxy request URL carrying `target` as its `url` parameter.
///
/// ## Errors
/// Returns `FetchError::InvalidUrl` if `proxy` is not a URL.
pub fn proxied_url(proxy: &str, target: &Url) -> FetchResult<Url> {
    Url::parse_with_params(proxy, &[("url", target.as_str())])
        .map_err(|e| FetchError::InvalidUrl(format!("{proxy}: {e}")))
}

/// ## Summary
/// Downloads calendar text from `url`.
///
/// On a transport error or non-success status the request is retried once
/// through `proxy`, if one is given.
///
/// ## Errors
/// - `FetchError::InvalidUrl` if `url` or `proxy` is not usable.
/// - `FetchError::Http` or `FetchError::Status` from the last attempt.
#[tracing::instrument(skip(client))]
pub async fn fetch_calendar(
    client: &Client,
    url: &str,
    proxy: Option<&str>,
) -> FetchResult<String> {
    let target = parse_target(url)?;

    match get_text(client, target.clone()).await {
        Ok(body) => Ok(body),
        Err(err) => {
            let Some(proxy) = proxy else {
                return Err(err);
            };
            tracing::warn!(error = %err, "Direct fetch failed, retrying through proxy");
            get_text(client, proxied_url(proxy, &target)?).await
        }
    }
}

async fn get_text(client: &Client, url: Url) -> FetchResult<String> {
    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await?;
    tracing::debug!(%url, bytes = body.len(), "Fetched calendar");
    Ok(body)
}
