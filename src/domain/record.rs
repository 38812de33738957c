//! Wire shape of the referral service response.

use serde::{Deserialize, Deserializer, Serialize};

/// Body of `GET /referrals/{userId}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralResponse {
    #[serde(rename = "referralTree", default)]
    pub referral_tree: Option<RawReferralRecord>,
}

/// One user in the raw referral hierarchy, as delivered by the referral service.
///
/// Every field is optional on the wire. `referrals` defaults to an empty list when
/// missing or `null`; a missing `name` is only rejected when the record is
/// transformed into a [`ReferralTree`](crate::domain::ReferralTree).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReferralRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub referrals: Vec<RawReferralRecord>,
}

impl RawReferralRecord {
    /// Record with only a name, for building hierarchies in code.
    pub fn named(name: impl Into<String>) -> Self {
        let mut record = Self::default();
        record.name = Some(name.into());
        record
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_referral_code(mut self, code: impl Into<String>) -> Self {
        self.referral_code = Some(code.into());
        self
    }

    pub fn with_referrals(mut self, referrals: Vec<RawReferralRecord>) -> Self {
        self.referrals = referrals;
        self
    }

    /// Number of records in this hierarchy, including `self`.
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(record) = stack.pop() {
            total += 1;
            stack.extend(record.referrals.iter());
        }
        total
    }
}

/// Flattens the hierarchy onto a heap stack; the derived drop recurses once per level.
impl Drop for RawReferralRecord {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.referrals);
        while let Some(mut record) = pending.pop() {
            pending.append(&mut record.referrals);
        }
    }
}

impl ReferralResponse {
    /// Parse a response body of any nesting depth.
    ///
    /// serde_json's recursion limit is lifted and the stack grows on demand,
    /// since every referral level costs two levels of JSON nesting.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut json = serde_json::Deserializer::from_slice(body);
        json.disable_recursion_limit();
        let response = Self::deserialize(serde_stacker::Deserializer::new(&mut json))?;
        json.end()?;
        Ok(response)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RawReferralRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<RawReferralRecord>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
