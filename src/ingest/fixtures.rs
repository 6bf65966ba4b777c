/// Test fixtures: representative JSON payloads from the EA Hydrology API.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the parsers. They reflect the real envelopes returned
/// by:
///   https://environment.data.gov.uk/hydrology/id/stations/{notation}.json
///   https://environment.data.gov.uk/hydrology/id/measures/{measure}/readings.json
///
/// Station response shape:
///   items[0]
///     .notation / .stationGuid / .@id — identifier candidates
///     .label, .riverName, .dateOpened
///     .lat / .long — numbers, occasionally numeric strings
///     .measures[].@id — measure URIs; the tail encodes what is measured
///
/// Readings response shape:
///   items[]
///     .measure   — measure URI
///     .date      — calendar date
///     .dateTime  — ISO 8601, served newest-first when _sort=-dateTime
///     .value     — number, occasionally a string or a sentinel like "---"
///     .quality   — Good / Estimated / Suspect / Unchecked / Missing
///     .completeness

/// Default station (E64999A) with four measures: one conductivity, two
/// dissolved-oxygen variants (percent saturation listed before mg/L, so the
/// mg/L preference is actually exercised), and a temperature series the
/// resolver must ignore.
#[cfg(test)]
pub(crate) fn fixture_station_json() -> &'static str {
    r#"{
      "meta": {
        "publisher": "Environment Agency",
        "version": "2.0"
      },
      "items": [
        {
          "@id": "http://environment.data.gov.uk/hydrology/id/stations/E64999A",
          "notation": "E64999A",
          "stationGuid": "4f8b2c1e-9d3a-4d6f-8a21-7c05e1b2d9aa",
          "label": "Bourne Eau at Eastgate",
          "riverName": "Bourne Eau",
          "dateOpened": "2004-03-17",
          "lat": 52.768,
          "long": -0.366,
          "observedProperty": [
            "http://environment.data.gov.uk/reference/def/op/conductivity",
            "http://environment.data.gov.uk/reference/def/op/dissolved-oxygen"
          ],
          "measures": [
            {
              "@id": "http://environment.data.gov.uk/hydrology/id/measures/E64999A-do-i-subdaily-sat",
              "parameter": "do",
              "parameterName": "Dissolved Oxygen",
              "period": 900,
              "unitName": "%",
              "valueType": "instantaneous"
            },
            {
              "@id": "http://environment.data.gov.uk/hydrology/id/measures/E64999A-cond-i-subdaily-uscm",
              "parameter": "cond",
              "parameterName": "Conductivity",
              "period": 900,
              "unitName": "uS/cm",
              "valueType": "instantaneous"
            },
            {
              "@id": "http://environment.data.gov.uk/hydrology/id/measures/E64999A-do-i-subdaily-mgl",
              "parameter": "do",
              "parameterName": "Dissolved Oxygen",
              "period": 900,
              "unitName": "mg/L",
              "valueType": "instantaneous"
            },
            {
              "@id": "http://environment.data.gov.uk/hydrology/id/measures/E64999A-temp-i-subdaily-c",
              "parameter": "temp",
              "parameterName": "Temperature",
              "period": 900,
              "unitName": "C",
              "valueType": "instantaneous"
            }
          ]
        }
      ]
    }"#
}

/// Station with an empty measures list — a metadata-only site. The resolver
/// must report it rather than resolve nothing silently.
#[cfg(test)]
pub(crate) fn fixture_station_no_measures_json() -> &'static str {
    r#"{
      "items": [
        {
          "@id": "http://environment.data.gov.uk/hydrology/id/stations/E11000X",
          "notation": "E11000X",
          "label": "Closed borehole site",
          "lat": 51.501,
          "long": -0.142,
          "measures": []
        }
      ]
    }"#
}

/// Three conductivity readings served newest-first, the order the API uses
/// for _sort=-dateTime. Timestamps carry the trailing Z the API sometimes
/// emits for sub-daily series.
#[cfg(test)]
pub(crate) fn fixture_readings_json() -> &'static str {
    r#"{
      "meta": {
        "publisher": "Environment Agency",
        "limit": 10
      },
      "items": [
        {
          "measure": "http://environment.data.gov.uk/hydrology/id/measures/E64999A-cond-i-subdaily-uscm",
          "date": "2024-05-01",
          "dateTime": "2024-05-01T10:00:00Z",
          "value": 523,
          "quality": "Good",
          "completeness": "Complete"
        },
        {
          "measure": "http://environment.data.gov.uk/hydrology/id/measures/E64999A-cond-i-subdaily-uscm",
          "date": "2024-05-01",
          "dateTime": "2024-05-01T09:45:00Z",
          "value": 519.5,
          "quality": "Unchecked",
          "completeness": "Complete"
        },
        {
          "measure": "http://environment.data.gov.uk/hydrology/id/measures/E64999A-cond-i-subdaily-uscm",
          "date": "2024-05-01",
          "dateTime": "2024-05-01T09:30:00Z",
          "value": 512.25,
          "quality": "Good",
          "completeness": "Complete"
        }
      ]
    }"#
}

/// Readings response where the provider ignored the requested sort and
/// over-returned: five readings in scrambled order. Exercises the local
/// newest-first sort + truncate + reverse.
#[cfg(test)]
pub(crate) fn fixture_readings_unordered_json() -> &'static str {
    r#"{
      "items": [
        {
          "measure": "http://environment.data.gov.uk/hydrology/id/measures/E64999A-do-i-subdaily-mgl",
          "dateTime": "2024-05-01T09:30:00Z",
          "value": 9.1,
          "quality": "Good"
        },
        {
          "measure": "http://environment.data.gov.uk/hydrology/id/measures/E64999A-do-i-subdaily-mgl",
          "dateTime": "2024-05-01T10:00:00Z",
          "value": 9.4,
          "quality": "Good"
        },
        {
          "measure": "http://environment.data.gov.uk/hydrology/id/measures/E64999A-do-i-subdaily-mgl",
          "dateTime": "2024-05-01T08:45:00Z",
          "value": 8.8,
          "quality": "Good"
        },
        {
          "measure": "http://environment.data.gov.uk/hydrology/id/measures/E64999A-do-i-subdaily-mgl",
          "dateTime": "2024-05-01T09:45:00Z",
          "value": 9.2,
          "quality": "Good"
        },
        {
          "measure": "http://environment.data.gov.uk/hydrology/id/measures/E64999A-do-i-subdaily-mgl",
          "dateTime": "2024-05-01T09:15:00Z",
          "value": 9.0,
          "quality": "Good"
        }
      ]
    }"#
}

/// Readings response with an empty items array — a measure with no data in
/// the requested window. Not an error; the fetcher returns an empty batch.
#[cfg(test)]
pub(crate) fn fixture_readings_empty_json() -> &'static str {
    r#"{
      "meta": {
        "publisher": "Environment Agency",
        "limit": 10
      },
      "items": []
    }"#
}
