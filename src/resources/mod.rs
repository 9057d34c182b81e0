//! Loading of external files.
//!
//! On the web every path is resolved against the page the demo is served
//! from; natively it is looked up under `./assets`.

pub mod texture;

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().ok_or_else(|| anyhow::anyhow!("no global window"))?;
    let href = window
        .location()
        .href()
        .map_err(|e| anyhow::anyhow!("cannot read page location: {e:?}"))?;
    let base = reqwest::Url::parse(&href)?;
    Ok(base.join(file_name)?)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name)?;
        reqwest::get(url)
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        tokio::fs::read(path).await?
    };

    Ok(data)
}
