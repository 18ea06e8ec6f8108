use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConvertError {
    #[error("Request to exchange rate api failed (error: {0})")]
    Http(#[from] reqwest::Error),
    #[error("Invalid currency code or API error: no {target} rate for {base}")]
    UnknownCurrency { base: String, target: String },
    #[error("'{0}' is not a valid amount")]
    InvalidAmount(String),
    #[error("Failed to save file {} (error: {source})", path.display())]
    History {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
