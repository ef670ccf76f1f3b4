//! Trello board API client
//!
//! Fetches cards (with their custom field items) from a configured board and
//! attaches back-link URLs. Cards are addressed by their short number within
//! a board, which is what appears in the Trello UI.

use crate::http::{self, Headers, HttpClient, UreqHttpClient};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

const BASE_URL: &str = "https://api.trello.com/1";

/// A Trello board
#[derive(Debug, Clone, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
}

/// A Trello card
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Opaque card id used by the API
    pub id: String,

    /// Short card number shown in the UI, unique within the board
    pub id_short: u64,

    /// Card title
    pub name: String,

    /// Card description (markdown)
    #[serde(default)]
    pub desc: String,

    /// Short link to the card
    pub short_url: String,

    /// Labels on the card
    #[serde(default)]
    pub labels: Vec<CardLabel>,

    /// Custom field values set on the card
    #[serde(default)]
    pub custom_field_items: Vec<CustomFieldItem>,
}

/// A label on a card
#[derive(Debug, Clone, Deserialize)]
pub struct CardLabel {
    pub name: String,
}

/// A custom field value attached to a card
///
/// Text fields carry their content in `value`; dropdown fields carry the id
/// of the selected option in `id_value` and need the board's field
/// definitions to resolve.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldItem {
    pub id_custom_field: String,

    #[serde(default)]
    pub id_value: Option<String>,

    #[serde(default)]
    pub value: Option<CustomFieldValue>,
}

/// The value payload of a text custom field
#[derive(Debug, Clone, Deserialize)]
pub struct CustomFieldValue {
    #[serde(default)]
    pub text: Option<String>,
}

/// A custom field definition on a board
#[derive(Debug, Clone, Deserialize)]
pub struct CustomFieldDef {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub options: Vec<CustomFieldOption>,
}

/// One selectable option of a dropdown custom field
#[derive(Debug, Clone, Deserialize)]
pub struct CustomFieldOption {
    pub id: String,
    pub value: OptionValue,
}

/// The display value of a dropdown option
#[derive(Debug, Clone, Deserialize)]
pub struct OptionValue {
    pub text: String,
}

/// Resolve a card's custom field items to `field name -> display value`.
///
/// Text values are taken as-is; dropdown values are looked up in the board's
/// field definitions. Items whose field or option is unknown, or that carry
/// no value at all, are skipped.
pub fn resolve_custom_fields(
    defs: &[CustomFieldDef],
    card: &Card,
) -> HashMap<String, String> {
    let mut fields = HashMap::new();

    for item in &card.custom_field_items {
        let Some(def) = defs.iter().find(|d| d.id == item.id_custom_field) else {
            continue;
        };

        let value = match (&item.value, &item.id_value) {
            (Some(CustomFieldValue { text: Some(text) }), _) => Some(text.clone()),
            (_, Some(id_value)) => def
                .options
                .iter()
                .find(|o| &o.id == id_value)
                .map(|o| o.value.text.clone()),
            _ => None,
        };

        if let Some(value) = value {
            fields.insert(def.name.clone(), value);
        }
    }

    fields
}

/// Trello API client
pub struct TrelloClient<H: HttpClient = UreqHttpClient> {
    /// API key
    key: String,

    /// Member token
    token: String,

    /// HTTP client
    http: H,
}

impl TrelloClient<UreqHttpClient> {
    /// Create a new Trello client
    pub fn new(key: &str, token: &str) -> Self {
        Self {
            key: key.to_string(),
            token: token.to_string(),
            http: UreqHttpClient,
        }
    }
}

impl<H: HttpClient> TrelloClient<H> {
    /// Create client with custom HTTP client (for testing)
    pub fn with_http_client(key: &str, token: &str, http: H) -> Self {
        Self {
            key: key.to_string(),
            token: token.to_string(),
            http,
        }
    }

    /// Build a URL with authentication and extra query parameters
    fn url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!(
            "{BASE_URL}/{path}?key={}&token={}",
            urlencoding::encode(&self.key),
            urlencoding::encode(&self.token)
        );
        for (name, value) in params {
            url.push_str(&format!("&{name}={}", urlencoding::encode(value)));
        }
        url
    }

    fn headers(&self) -> Headers {
        vec![("Accept".to_string(), "application/json".to_string())]
    }

    fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str, what: &str) -> Result<T> {
        let response = self
            .http
            .get(url, self.headers())
            .with_context(|| format!("Failed to fetch {what}"))?;

        if !http::is_success(response.status) {
            return Err(http::api_error(&response).into());
        }

        serde_json::from_str(&response.body)
            .with_context(|| format!("Failed to parse {what} response"))
    }

    /// Fetch a board by id
    pub fn get_board(&self, board_id: &str) -> Result<Board> {
        let url = self.url(&format!("boards/{board_id}"), &[("fields", "id,name")]);
        self.get_json(&url, &format!("board {board_id}"))
    }

    /// Fetch a card by its short number within a board
    ///
    /// Custom field items ride along so a card import needs only one extra
    /// request (the board's field definitions).
    pub fn get_card(&self, board_id: &str, card_number: u64) -> Result<Card> {
        let url = self.url(
            &format!("boards/{board_id}/cards/{card_number}"),
            &[
                ("fields", "id,idShort,name,desc,shortUrl,labels"),
                ("customFieldItems", "true"),
            ],
        );
        self.get_json(&url, &format!("card #{card_number}"))
    }

    /// Fetch the custom field definitions of a board
    pub fn get_custom_fields(&self, board_id: &str) -> Result<Vec<CustomFieldDef>> {
        let url = self.url(&format!("boards/{board_id}/customFields"), &[]);
        self.get_json(&url, &format!("custom fields of board {board_id}"))
    }

    /// Attach a URL to a card
    pub fn attach_url(&self, card_id: &str, attached_url: &str) -> Result<()> {
        let url = self.url(
            &format!("cards/{card_id}/attachments"),
            &[("url", attached_url)],
        );

        let response = self
            .http
            .post(&url, self.headers(), String::new())
            .with_context(|| format!("Failed to attach URL to card {card_id}"))?;

        if !http::is_success(response.status) {
            return Err(http::api_error(&response).into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_item(field_id: &str, text: &str) -> CustomFieldItem {
        CustomFieldItem {
            id_custom_field: field_id.to_string(),
            id_value: None,
            value: Some(CustomFieldValue {
                text: Some(text.to_string()),
            }),
        }
    }

    fn option_item(field_id: &str, option_id: &str) -> CustomFieldItem {
        CustomFieldItem {
            id_custom_field: field_id.to_string(),
            id_value: Some(option_id.to_string()),
            value: None,
        }
    }

    fn card_with_items(items: Vec<CustomFieldItem>) -> Card {
        Card {
            id: "abc".to_string(),
            id_short: 42,
            name: "Ship the feature".to_string(),
            desc: "Details".to_string(),
            short_url: "https://trello.com/c/abc".to_string(),
            labels: vec![],
            custom_field_items: items,
        }
    }

    fn defs() -> Vec<CustomFieldDef> {
        vec![
            CustomFieldDef {
                id: "f-note".to_string(),
                name: "Deploy Note".to_string(),
                options: vec![],
            },
            CustomFieldDef {
                id: "f-review".to_string(),
                name: "Product Review".to_string(),
                options: vec![CustomFieldOption {
                    id: "o-yes".to_string(),
                    value: OptionValue {
                        text: "Yes".to_string(),
                    },
                }],
            },
        ]
    }

    #[test]
    fn test_resolve_text_field() {
        let card = card_with_items(vec![text_item("f-note", "Rolls out X")]);
        let fields = resolve_custom_fields(&defs(), &card);

        assert_eq!(fields.get("Deploy Note").unwrap(), "Rolls out X");
    }

    #[test]
    fn test_resolve_dropdown_field() {
        let card = card_with_items(vec![option_item("f-review", "o-yes")]);
        let fields = resolve_custom_fields(&defs(), &card);

        assert_eq!(fields.get("Product Review").unwrap(), "Yes");
    }

    #[test]
    fn test_resolve_skips_unknown_field_and_option() {
        let card = card_with_items(vec![
            option_item("f-unknown", "o-yes"),
            option_item("f-review", "o-unknown"),
        ]);
        let fields = resolve_custom_fields(&defs(), &card);

        assert!(fields.is_empty());
    }

    #[test]
    fn test_card_deserialize() {
        let json = r#"{
            "id": "5f1234",
            "idShort": 42,
            "name": "Ship the feature",
            "desc": "Details",
            "shortUrl": "https://trello.com/c/abc",
            "labels": [{"name": "backend", "color": "green"}],
            "customFieldItems": [
                {"idCustomField": "f-note", "value": {"text": "Rolls out X"}},
                {"idCustomField": "f-review", "idValue": "o-yes"}
            ]
        }"#;

        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.id_short, 42);
        assert_eq!(card.labels[0].name, "backend");
        assert_eq!(card.custom_field_items.len(), 2);
        assert_eq!(
            card.custom_field_items[0].value.as_ref().unwrap().text,
            Some("Rolls out X".to_string())
        );
        assert_eq!(
            card.custom_field_items[1].id_value,
            Some("o-yes".to_string())
        );
    }

    #[test]
    fn test_custom_field_def_deserialize() {
        let json = r#"[
            {"id": "f-review", "name": "Product Review", "type": "list",
             "options": [{"id": "o-yes", "value": {"text": "Yes"}}]},
            {"id": "f-note", "name": "Deploy Note", "type": "text"}
        ]"#;

        let defs: Vec<CustomFieldDef> = serde_json::from_str(json).unwrap();
        assert_eq!(defs[0].options[0].value.text, "Yes");
        assert!(defs[1].options.is_empty());
    }
}
