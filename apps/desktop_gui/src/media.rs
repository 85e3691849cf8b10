//! Image loading for transcript bubbles and the account avatar.

use base64::Engine as _;

/// Longest edge of a decoded preview.
const PREVIEW_MAX_EDGE: u32 = 1024;

#[derive(Clone)]
pub struct PreviewImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

/// Decodes the payload of a `data:` URL. Returns `Ok(None)` when `url` is not
/// a data URL.
pub fn decode_data_url(url: &str) -> Result<Option<Vec<u8>>, String> {
    let Some(rest) = url.strip_prefix("data:") else {
        return Ok(None);
    };
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| "malformed data url: missing ',' separator".to_string())?;

    if meta.split(';').any(|part| part.eq_ignore_ascii_case("base64")) {
        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        base64::engine::general_purpose::STANDARD
            .decode(compact.as_bytes())
            .map(Some)
            .map_err(|err| format!("invalid base64 in data url: {err}"))
    } else {
        Ok(Some(payload.as_bytes().to_vec()))
    }
}

pub fn decode_preview_image(bytes: &[u8]) -> Result<PreviewImage, String> {
    let dynamic = image::load_from_memory(bytes).map_err(|err| err.to_string())?;
    let resized = dynamic
        .thumbnail(PREVIEW_MAX_EDGE, PREVIEW_MAX_EDGE)
        .to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(PreviewImage {
        width,
        height,
        rgba: resized.into_raw(),
    })
}

pub async fn fetch_image_bytes(http: &reqwest::Client, url: &str) -> Result<Vec<u8>, String> {
    if let Some(bytes) = decode_data_url(url)? {
        return Ok(bytes);
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(format!("unsupported image url scheme: {url}"));
    }

    let response = http
        .get(url)
        .send()
        .await
        .map_err(|err| format!("failed to reach image host: {err}"))?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("image host returned {}", status.as_u16()));
    }
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|err| format!("failed to read image body: {err}"))
}

pub async fn load_preview(http: &reqwest::Client, url: &str) -> Result<PreviewImage, String> {
    let bytes = fetch_image_bytes(http, url).await?;
    decode_preview_image(&bytes)
}
