//! Single call path from a built [`ParamMap`] to a classified result.

use serde_json::Value;

use super::classify::classify;
use super::client::{Binary, TomTomApi};
use super::error::TomTomResult;
use super::params::ParamMap;

/// GET a JSON endpoint; any failure goes through the classifier.
pub async fn fetch_json(
    api: &dyn TomTomApi,
    path: &str,
    params: &ParamMap,
    context: &str,
) -> TomTomResult<Value> {
    api.get_json(path, params)
        .await
        .map_err(|failure| classify(failure, context))
}

/// GET a binary endpoint (static map images).
pub async fn fetch_binary(
    api: &dyn TomTomApi,
    path: &str,
    params: &ParamMap,
    context: &str,
) -> TomTomResult<Binary> {
    api.get_binary(path, params)
        .await
        .map_err(|failure| classify(failure, context))
}
