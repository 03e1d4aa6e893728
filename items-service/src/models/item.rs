use mongodb::bson::{Bson, Document};
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

/// A document from the `items` collection, kept exactly as stored.
///
/// The collection has no schema: `name` and `price` are conventional, any
/// other field is passed through. JSON output keeps the stored field order and
/// BSON value types; only a top-level ObjectId `_id` is rendered as a hex
/// string. An `_id` of any other type is returned as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Item(Document);

impl Item {
    pub fn id(&self) -> Option<&Bson> {
        self.0.get("_id")
    }

    pub fn name(&self) -> Option<&Bson> {
        self.0.get("name")
    }

    pub fn price(&self) -> Option<&Bson> {
        self.0.get("price")
    }

    pub fn document(&self) -> &Document {
        &self.0
    }
}

impl From<Document> for Item {
    fn from(doc: Document) -> Self {
        Self(doc)
    }
}

impl Serialize for Item {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in &self.0 {
            match (key.as_str(), value) {
                ("_id", Bson::ObjectId(oid)) => map.serialize_entry(key, &oid.to_hex())?,
                _ => map.serialize_entry(key, value)?,
            }
        }
        map.end()
    }
}
