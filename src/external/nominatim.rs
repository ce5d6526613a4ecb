use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::{
    api::Geocoder,
    entities::Coordinates,
    error::{no_result_error, parse_error, upstream_error, Error},
};

/// One record of the city search response. Coordinates arrive as text.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub place_id: u64,
    pub lat: String,
    pub lon: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeocodedCity {
    pub place_id: u64,
    pub coordinates: Coordinates,
}

impl TryFrom<SearchResult> for GeocodedCity {
    type Error = Error;

    fn try_from(result: SearchResult) -> Result<Self, Error> {
        let coordinates = Coordinates {
            lat: result.lat.trim().parse()?,
            lon: result.lon.trim().parse()?,
        };

        // "NaN" and "inf" parse as f64
        if !coordinates.is_finite() {
            return Err(parse_error(coordinates));
        }

        Ok(Self {
            place_id: result.place_id,
            coordinates,
        })
    }
}

#[derive(Clone, Debug)]
pub struct Nominatim {
    client: reqwest::Client,
    base_url: String,
}

impl Nominatim {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder().user_agent(user_agent);

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl Geocoder for Nominatim {
    #[tracing::instrument(skip(self))]
    async fn find_city(&self, city: &str) -> Result<GeocodedCity, Error> {
        let url = format!("{}/search", self.base_url);

        let res = self
            .client
            .get(url)
            .query(&[("city", city)])
            .query(&[("format", "json")])
            .query(&[("limit", "1")])
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::warn!("city search failed with status {}", res.status().as_u16());
            return Err(upstream_error());
        }

        // a body that arrived but does not decode is a parse failure, not a transport one
        let body = res.text().await?;
        let results: Vec<SearchResult> = serde_json::from_str(&body).map_err(parse_error)?;

        let first = results.into_iter().next().ok_or_else(|| no_result_error())?;

        first.try_into()
    }
}

#[cfg(test)]
mod tests {
    use httpmock::{Method::GET, MockServer};
    use serde_json::json;

    use super::Nominatim;
    use crate::api::Geocoder;

    fn client(server: &MockServer) -> Nominatim {
        Nominatim::new(server.base_url(), "myplaces-test", None).unwrap()
    }

    #[tokio::test]
    async fn resolves_first_result() {
        let server = MockServer::start_async().await;

        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search")
                    .query_param("city", "Helsinki")
                    .query_param("format", "json")
                    .query_param("limit", "1");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!([
                        { "place_id": 42, "lat": "60.1699", "lon": "24.9384", "display_name": "Helsinki" },
                        { "place_id": 43, "lat": "0", "lon": "0" }
                    ]));
            })
            .await;

        let city = client(&server).find_city("Helsinki").await.unwrap();

        mock.assert_async().await;
        assert_eq!(city.place_id, 42);
        assert_eq!(city.coordinates.lat, 60.1699);
        assert_eq!(city.coordinates.lon, 24.9384);
    }

    #[tokio::test]
    async fn empty_response_is_no_result() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!([]));
            })
            .await;

        let err = client(&server).find_city("Nowhereville").await.unwrap_err();

        assert!(err.is_no_result_error());
    }

    #[tokio::test]
    async fn server_failure_is_transport_error() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(503);
            })
            .await;

        let err = client(&server).find_city("Helsinki").await.unwrap_err();

        assert!(err.is_transport_error());
    }

    #[tokio::test]
    async fn rejected_request_is_transport_error() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(403);
            })
            .await;

        let err = client(&server).find_city("Helsinki").await.unwrap_err();

        assert!(err.is_transport_error());
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let geocoder = Nominatim::new("http://127.0.0.1:9", "myplaces-test", None).unwrap();

        let err = geocoder.find_city("Helsinki").await.unwrap_err();

        assert!(err.is_transport_error());
    }

    #[tokio::test]
    async fn non_numeric_coordinates_are_parse_errors() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!([{ "place_id": 7, "lat": "north", "lon": "24.9" }]));
            })
            .await;

        let err = client(&server).find_city("Helsinki").await.unwrap_err();

        assert!(err.is_parse_error());
    }

    #[tokio::test]
    async fn badly_shaped_records_are_parse_errors() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!([{ "place_id": 7, "lat": 60.1, "lon": 24.9 }]));
            })
            .await;

        let err = client(&server).find_city("Helsinki").await.unwrap_err();

        assert!(err.is_parse_error());
        assert!(!err.is_transport_error());
    }

    #[tokio::test]
    async fn non_finite_coordinates_are_parse_errors() {
        let server = MockServer::start_async().await;

        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!([{ "place_id": 7, "lat": "NaN", "lon": "inf" }]));
            })
            .await;

        let err = client(&server).find_city("Helsinki").await.unwrap_err();

        assert!(err.is_parse_error());
    }
}
