//! Validates semantic parameters against an endpoint and encodes them for the wire.

use crate::query::encode::{divrec_type, encode_date, parse_date, water_class};
use crate::query::endpoint::{Encoding, Endpoint, ParamSpec};
use crate::query::error::QueryError;
use crate::query::params::{ParamValue, QueryParameters, RawParams, AOI_POINT, POLYGON, RADIUS};
use crate::spatial::aoi::{Aoi, SpatialQuery};
use log::debug;

/// Turns [`RawParams`] into [`QueryParameters`] for one endpoint.
///
/// Validation happens entirely up front, so no request is ever sent for a bad query:
///
/// * names the endpoint does not accept fail with [`QueryError::UnknownParameter`],
///   including `aoi_point`/`polygon`/`radius` on endpoints without location search;
/// * `aoi_point` together with `polygon` fails with [`QueryError::ConflictingParameter`];
/// * dates must be `YYYY-MM-DD` ([`QueryError::InvalidDate`]) and go out as `MM-DD-YYYY`;
/// * list values become repeated query parameters;
/// * empty strings and empty lists are treated as absent.
///
/// # Examples
///
/// ```
/// use cdss::{Endpoint, QueryBuilder, RawParams};
///
/// let params = RawParams::new()
///     .with("wdid", vec!["0100503", "0100504"])
///     .with("start_date", "2015-01-01");
/// let query = QueryBuilder::build(Endpoint::DivRecDay, &params).unwrap();
///
/// assert_eq!(query.get_all("wdid"), vec!["0100503", "0100504"]);
/// assert_eq!(query.get_all("min-dataMeasDate"), vec!["01-01-2015"]);
/// ```
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn build(endpoint: Endpoint, params: &RawParams) -> Result<QueryParameters, QueryError> {
        let descriptor = endpoint.descriptor();
        let mut pairs: Vec<(String, String)> = descriptor
            .fixed
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let mut aoi: Option<(&str, Aoi)> = None;
        let mut radius: Option<f64> = None;

        for (name, value) in params.iter() {
            if matches!(name, AOI_POINT | POLYGON | RADIUS) {
                if !descriptor.spatial {
                    return Err(unknown(endpoint, name));
                }
                match (name, value) {
                    (RADIUS, ParamValue::Number(r)) => radius = Some(*r),
                    (RADIUS, ParamValue::Integer(r)) => radius = Some(*r as f64),
                    (AOI_POINT, ParamValue::Point(point)) => {
                        set_aoi(endpoint, &mut aoi, name, Aoi::Point(*point))?
                    }
                    (POLYGON, ParamValue::Polygon(polygon)) => {
                        set_aoi(endpoint, &mut aoi, name, Aoi::Polygon(polygon.clone()))?
                    }
                    _ => return Err(wrong_kind(name, value)),
                }
                continue;
            }

            let spec = descriptor
                .param(name)
                .ok_or_else(|| unknown(endpoint, name))?;
            for encoded in encode_value(spec, value)? {
                pairs.push((spec.wire.to_string(), encoded));
            }
        }

        let mask = match aoi {
            Some((_, aoi)) => {
                let spatial = SpatialQuery::from_aoi(&aoi, radius)?;
                pairs.extend(spatial.to_query_pairs());
                spatial.mask
            }
            None if radius.is_some() => {
                return Err(QueryError::validation(format!(
                    "'{RADIUS}' needs an '{AOI_POINT}' or '{POLYGON}' to search around"
                )));
            }
            None => None,
        };

        debug!("Built {} query parameters for {}", pairs.len(), endpoint);
        Ok(QueryParameters::new(endpoint, pairs, mask))
    }
}

fn unknown(endpoint: Endpoint, name: &str) -> QueryError {
    QueryError::UnknownParameter {
        endpoint,
        name: name.to_string(),
    }
}

fn wrong_kind(name: &str, value: &ParamValue) -> QueryError {
    QueryError::validation(format!(
        "parameter '{name}' does not accept a {} value",
        value.kind()
    ))
}

fn set_aoi<'a>(
    endpoint: Endpoint,
    slot: &mut Option<(&'a str, Aoi)>,
    name: &'a str,
    aoi: Aoi,
) -> Result<(), QueryError> {
    if let Some((first, _)) = slot {
        return Err(QueryError::ConflictingParameter {
            endpoint,
            first: first.to_string(),
            second: name.to_string(),
        });
    }
    *slot = Some((name, aoi));
    Ok(())
}

/// Encodes one value into zero or more wire values.
fn encode_value(spec: &ParamSpec, value: &ParamValue) -> Result<Vec<String>, QueryError> {
    if let ParamValue::Text(text) = value {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
    }

    let encoded = match (spec.encoding, value) {
        (Encoding::Text, ParamValue::Text(s)) => s.trim().to_string(),
        (Encoding::Text, ParamValue::Integer(i)) => i.to_string(),

        (Encoding::Integer, ParamValue::Integer(i)) => i.to_string(),
        (Encoding::Integer, ParamValue::Text(s)) => parse_integer(spec.name, s)?.to_string(),

        (Encoding::Year, ParamValue::Integer(i)) => check_year(spec.name, *i)?.to_string(),
        (Encoding::Year, ParamValue::Text(s)) => {
            check_year(spec.name, parse_integer(spec.name, s)?)?.to_string()
        }

        (Encoding::Bool, ParamValue::Bool(b)) => b.to_string(),
        (Encoding::Bool, ParamValue::Text(s)) => match s.trim().to_lowercase().as_str() {
            "true" => "true".to_string(),
            "false" => "false".to_string(),
            _ => {
                return Err(QueryError::validation(format!(
                    "parameter '{}' expects true or false, got '{s}'",
                    spec.name
                )))
            }
        },

        (Encoding::Date, ParamValue::Date(d)) => encode_date(*d),
        (Encoding::Date, ParamValue::Text(s)) => encode_date(parse_date(spec.name, s)?),

        (Encoding::List, ParamValue::List(items)) => {
            return Ok(items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect())
        }
        (Encoding::List, ParamValue::Text(s)) => s.trim().to_string(),
        (Encoding::List, ParamValue::Integer(i)) => i.to_string(),

        (Encoding::WaterClass, ParamValue::Text(s)) => water_class(s),
        (Encoding::DivRecType, ParamValue::Text(s)) => divrec_type(s)?.to_string(),

        _ => return Err(wrong_kind(spec.name, value)),
    };
    Ok(vec![encoded])
}

fn parse_integer(name: &str, value: &str) -> Result<i64, QueryError> {
    value.trim().parse().map_err(|_| {
        QueryError::validation(format!(
            "parameter '{name}' expects a whole number, got '{value}'"
        ))
    })
}

fn check_year(name: &str, year: i64) -> Result<i64, QueryError> {
    if (1000..=9999).contains(&year) {
        Ok(year)
    } else {
        Err(QueryError::validation(format!(
            "parameter '{name}' expects a four-digit year, got {year}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::error::GeometryError;
    use crate::spatial::geometry::{LonLat, Polygon};
    use chrono::NaiveDate;

    fn square() -> Polygon {
        Polygon::new(vec![
            LonLat(-105.0, 39.0),
            LonLat(-104.0, 39.0),
            LonLat(-104.0, 40.0),
            LonLat(-105.0, 40.0),
        ])
        .unwrap()
    }

    #[test]
    fn fixed_parameters_come_first() {
        let query = QueryBuilder::build(Endpoint::TelemetryStations, &RawParams::new()).unwrap();
        assert_eq!(
            query.pairs(),
            &[
                ("format".to_string(), "json".to_string()),
                ("dateFormat".to_string(), "spaceSepToSeconds".to_string()),
                ("includeThirdParty".to_string(), "true".to_string()),
            ]
        );
        assert!(query.polygon_mask().is_none());
    }

    #[test]
    fn encodes_dates_and_lists() {
        let params = RawParams::new()
            .with("wdid", vec!["0100503", " ", "0100504"])
            .with("start_date", "2015-01-01")
            .with("end_date", NaiveDate::from_ymd_opt(2016, 12, 31).unwrap())
            .with("wc_identifier", "divs");
        let query = QueryBuilder::build(Endpoint::DivRecMonth, &params).unwrap();

        assert_eq!(query.get_all("wdid"), vec!["0100503", "0100504"]);
        assert_eq!(query.get_all("min-dataMeasDate"), vec!["01-01-2015"]);
        assert_eq!(query.get_all("max-dataMeasDate"), vec!["12-31-2016"]);
        assert_eq!(query.get_all("wcIdentifier"), vec!["*diversion*"]);
    }

    #[test]
    fn rejects_unknown_parameters() {
        let params = RawParams::new().with("station_id", "PLACHECO");
        let err = QueryBuilder::build(Endpoint::TelemetryTsDay, &params).unwrap_err();
        assert_eq!(
            err,
            QueryError::UnknownParameter {
                endpoint: Endpoint::TelemetryTsDay,
                name: "station_id".to_string()
            }
        );
    }

    #[test]
    fn spatial_parameters_need_a_spatial_endpoint() {
        let params = RawParams::new().with(AOI_POINT, LonLat(-105.0, 39.0));
        let err = QueryBuilder::build(Endpoint::DivRecDay, &params).unwrap_err();
        assert!(matches!(err, QueryError::UnknownParameter { .. }));
    }

    #[test]
    fn point_and_polygon_conflict() {
        let params = RawParams::new()
            .with(AOI_POINT, LonLat(-105.0, 39.0))
            .with(POLYGON, square());
        let err = QueryBuilder::build(Endpoint::Structures, &params).unwrap_err();
        assert_eq!(
            err,
            QueryError::ConflictingParameter {
                endpoint: Endpoint::Structures,
                first: AOI_POINT.to_string(),
                second: POLYGON.to_string(),
            }
        );
    }

    #[test]
    fn point_search_adds_location_parameters() {
        let params = RawParams::new()
            .with(AOI_POINT, LonLat(-104.99, 39.74))
            .with(RADIUS, 5);
        let query = QueryBuilder::build(Endpoint::ClimateStations, &params).unwrap();
        assert_eq!(query.get_all("latitude"), vec!["39.74000"]);
        assert_eq!(query.get_all("longitude"), vec!["-104.99000"]);
        assert_eq!(query.get_all("radius"), vec!["5"]);
        assert_eq!(query.get_all("units"), vec!["miles"]);
    }

    #[test]
    fn polygon_search_keeps_mask() {
        let params = RawParams::new().with(POLYGON, square());
        let query = QueryBuilder::build(Endpoint::SurfaceWaterStations, &params).unwrap();
        assert_eq!(query.polygon_mask(), Some(&square()));
        assert_eq!(query.get_all("radius").len(), 1);
    }

    #[test]
    fn radius_alone_is_invalid() {
        let params = RawParams::new().with(RADIUS, 10.0);
        let err = QueryBuilder::build(Endpoint::Structures, &params).unwrap_err();
        assert!(matches!(err, QueryError::Validation { .. }));
    }

    #[test]
    fn bad_radius_is_a_geometry_error() {
        let params = RawParams::new()
            .with(AOI_POINT, LonLat(-105.0, 39.0))
            .with(RADIUS, -1.0);
        let err = QueryBuilder::build(Endpoint::Structures, &params).unwrap_err();
        assert_eq!(err, QueryError::Geometry(GeometryError::InvalidRadius(-1.0)));
    }

    #[test]
    fn invalid_date_fails() {
        let params = RawParams::new().with("start_date", "not-a-date");
        let err = QueryBuilder::build(Endpoint::TelemetryTsHour, &params).unwrap_err();
        assert!(matches!(err, QueryError::InvalidDate { .. }));
    }

    #[test]
    fn scalar_encodings() {
        let params = RawParams::new()
            .with("division", "1")
            .with("include_third_party", false);
        assert!(QueryBuilder::build(Endpoint::TelemetryTsDay, &params).is_err());

        let params = RawParams::new()
            .with("abbrev", "PLACHECO")
            .with("include_third_party", "TRUE");
        let query = QueryBuilder::build(Endpoint::TelemetryTsDay, &params).unwrap();
        assert_eq!(query.get_all("includeThirdParty"), vec!["true"]);

        let bad_division = RawParams::new().with("division", "one");
        assert!(matches!(
            QueryBuilder::build(Endpoint::Structures, &bad_division),
            Err(QueryError::Validation { .. })
        ));

        let bad_year = RawParams::new().with("start_year", 15);
        assert!(QueryBuilder::build(Endpoint::ClimateTsMonth, &bad_year).is_err());
    }

    #[test]
    fn empty_values_are_omitted() {
        let params = RawParams::new()
            .with("county", "")
            .with("wdid", Vec::<String>::new());
        let query = QueryBuilder::build(Endpoint::Structures, &params).unwrap();
        assert!(query.get_all("county").is_empty());
        assert!(query.get_all("wdid").is_empty());
    }

    #[test]
    fn wrong_value_kind_is_rejected() {
        let params = RawParams::new().with("start_date", true);
        let err = QueryBuilder::build(Endpoint::DivRecDay, &params).unwrap_err();
        assert!(matches!(err, QueryError::Validation { .. }));
    }
}
