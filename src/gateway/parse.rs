use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::GatewayError;

/// Parses the JSON document embedded in a model answer.
///
/// Models often wrap JSON in markdown fences or add a sentence around it, so
/// each opening bracket is paired with the last matching closer and the first
/// span that parses wins. A bracket in the prose (`[Note] {...}`) is skipped.
pub fn json_payload<T: DeserializeOwned>(text: &str) -> Result<T, GatewayError> {
    let mut first_error = None;
    for body in candidate_spans(text) {
        match serde_json::from_str(body) {
            Ok(value) => return Ok(value),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    match first_error {
        Some(err) => Err(err.into()),
        None => Err(GatewayError::EmptyResponse),
    }
}

fn candidate_spans(text: &str) -> impl Iterator<Item = &str> {
    text.match_indices(['{', '[']).filter_map(move |(start, open)| {
        let close = if open == "{" { '}' } else { ']' };
        let end = text.rfind(close)?;
        (end > start).then(|| &text[start..=end])
    })
}

/// A list answer, either bare or wrapped in a single-key object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum Listing<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(
            alias = "activities",
            alias = "suggestions",
            alias = "hotels",
            alias = "hotelRecommendations"
        )]
        items: Vec<T>,
    },
}

impl<T> Listing<T> {
    pub(super) fn into_items(self) -> Vec<T> {
        match self {
            Listing::Bare(items) | Listing::Wrapped { items } => items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Place {
        location: String,
    }

    #[test]
    fn strips_markdown_fences() {
        let text = "```json\n{\"location\": \"Hawa Mahal\"}\n```";
        let place: Place = json_payload(text).unwrap();
        assert_eq!(place.location, "Hawa Mahal");
    }

    #[test]
    fn accepts_bare_and_wrapped_lists() {
        let bare: Listing<Place> = json_payload("[{\"location\":\"Amer Fort\"}]").unwrap();
        assert_eq!(bare.into_items().len(), 1);

        let wrapped: Listing<Place> =
            json_payload("Sure! {\"activities\": [{\"location\":\"Nahargarh\"}]}").unwrap();
        assert_eq!(
            wrapped.into_items(),
            vec![Place {
                location: "Nahargarh".into()
            }]
        );
    }

    #[test]
    fn bracketed_prose_before_the_object_is_skipped() {
        let place: Place = json_payload("[Note] {\"location\":\"Jantar Mantar\"}").unwrap();
        assert_eq!(place.location, "Jantar Mantar");

        // The array inside the object must not pair with the leading `[`.
        let wrapped: Listing<Place> =
            json_payload("[Draft] {\"hotels\": [{\"location\":\"Samode\"}]}").unwrap();
        assert_eq!(wrapped.into_items().len(), 1);
    }

    #[test]
    fn unbalanced_brackets_report_the_first_parse_error() {
        let err = json_payload::<Place>("[see below] {\"location\": 3}").unwrap_err();
        assert!(matches!(err, GatewayError::Malformed(_)));
    }

    #[test]
    fn text_without_json_is_empty() {
        let err = json_payload::<Place>("I could not plan that trip.").unwrap_err();
        assert!(matches!(err, GatewayError::EmptyResponse));

        let err = json_payload::<Place>("{\"location\": ").unwrap_err();
        assert!(matches!(err, GatewayError::EmptyResponse | GatewayError::Malformed(_)));
    }
}
