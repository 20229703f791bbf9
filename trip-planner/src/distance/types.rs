//! Google Maps Distance Matrix response DTOs.

use serde::Deserialize;

/// Response from the `distancematrix/json` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DistanceMatrixResponse {
    /// `"OK"` or an error code such as `"OVER_QUERY_LIMIT"`.
    pub status: Option<String>,

    pub error_message: Option<String>,

    /// One row per origin, in request order.
    pub rows: Option<Vec<MatrixRow>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatrixRow {
    /// One element per destination, in request order.
    pub elements: Vec<MatrixElement>,
}

/// A single origin/destination cell.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatrixElement {
    /// `"OK"`, `"NOT_FOUND"` or `"ZERO_RESULTS"`.
    pub status: Option<String>,
    pub distance: Option<Measure>,
    pub duration: Option<Measure>,
}

/// A value with its display text, e.g. meters and `"612 km"`.
#[derive(Debug, Clone, Deserialize)]
pub struct Measure {
    pub value: u64,
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_matrix() {
        let json = r#"{
            "destination_addresses": ["Pasadena, CA"],
            "origin_addresses": ["Hayward, CA"],
            "rows": [{"elements": [{
                "distance": {"text": "592 km", "value": 592345},
                "duration": {"text": "5 hours 31 mins", "value": 19860},
                "status": "OK"
            }]}],
            "status": "OK"
        }"#;
        let resp: DistanceMatrixResponse = serde_json::from_str(json).unwrap();
        let rows = resp.rows.unwrap();
        let element = &rows[0].elements[0];
        assert_eq!(element.distance.as_ref().unwrap().value, 592_345);
        assert_eq!(element.duration.as_ref().unwrap().value, 19_860);
    }

    #[test]
    fn decode_unreachable_element() {
        let json = r#"{"rows": [{"elements": [{"status": "ZERO_RESULTS"}]}], "status": "OK"}"#;
        let resp: DistanceMatrixResponse = serde_json::from_str(json).unwrap();
        let element = &resp.rows.unwrap()[0].elements[0];
        assert!(element.distance.is_none());
        assert_eq!(element.status.as_deref(), Some("ZERO_RESULTS"));
    }
}
