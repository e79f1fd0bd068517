//! Client for the IBGE geography lookup service

use super::client::{check_status, normalize_base_url};
use super::error::ApiError;
use super::traits::GeographyApi;
use crate::state::{Region, SubRegion};
use async_trait::async_trait;
use reqwest::Client;

/// Default geography service address
pub const DEFAULT_GEOGRAPHY_URL: &str = "https://servicodados.ibge.gov.br/api/v1";

#[derive(Debug, Clone)]
pub struct GeographyClient {
    http: Client,
    base_url: String,
}

impl GeographyClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            http: Client::new(),
            base_url: normalize_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl GeographyApi for GeographyClient {
    async fn list_regions(&self) -> Result<Vec<Region>, ApiError> {
        let url = format!("{}/localidades/estados", self.base_url);
        let response = self.http.get(url).send().await?;
        Ok(check_status(response).await?.json().await?)
    }

    async fn list_sub_regions(&self, region_id: &str) -> Result<Vec<SubRegion>, ApiError> {
        let url = format!(
            "{}/localidades/estados/{region_id}/municipios",
            self.base_url
        );
        let response = self.http.get(url).send().await?;
        Ok(check_status(response).await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::super::client::test_server::{received, serve_once};
    use super::*;

    #[tokio::test]
    async fn test_list_regions() {
        let (base_url, server) =
            serve_once("200 OK", r#"[{"id":35,"sigla":"SP","nome":"São Paulo"}]"#).await;
        let client = GeographyClient::new(&base_url).unwrap();

        let regions = client.list_regions().await.unwrap();
        let request = received(server).await;
        assert!(request.starts_with("GET /localidades/estados HTTP/1.1"));
        assert_eq!(regions[0].code, "SP");
        assert_eq!(regions[0].id, "35");
    }

    #[tokio::test]
    async fn test_list_sub_regions_uses_region_id() {
        let (base_url, server) = serve_once("200 OK", r#"[{"id":1,"nome":"Campinas"}]"#).await;
        let client = GeographyClient::new(&base_url).unwrap();

        let cities = client.list_sub_regions("35").await.unwrap();
        let request = received(server).await;
        assert!(request.starts_with("GET /localidades/estados/35/municipios HTTP/1.1"));
        assert_eq!(cities[0].name, "Campinas");
    }

    #[tokio::test]
    async fn test_server_error_is_status() {
        let (base_url, server) = serve_once("500 Internal Server Error", "boom").await;
        let client = GeographyClient::new(&base_url).unwrap();

        let err = client.list_regions().await.unwrap_err();
        received(server).await;
        assert!(matches!(err, ApiError::Status { .. }));
    }
}
