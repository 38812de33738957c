//! Canonicalization of raw referral records into a [`ReferralTree`].

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::record::RawReferralRecord;
use crate::domain::tree::{NodeData, NodeId, ReferralTree};

/// Build the canonical tree for a raw referral hierarchy.
///
/// `None` in gives `None` out. Identity fields are copied, `referrals` becomes
/// the child list in the original order. A record without a usable name is
/// rejected and no tree is produced.
///
/// Built with an explicit stack, so arbitrarily deep hierarchies do not grow
/// the call stack.
#[instrument(level = "debug", skip(raw))]
pub fn transform(raw: Option<&RawReferralRecord>) -> DomainResult<Option<ReferralTree>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let mut tree = ReferralTree::with_root(node_data(raw, || "referralTree".to_string())?);
    let mut stack: Vec<(&RawReferralRecord, NodeId, String)> =
        vec![(raw, tree.root(), "referralTree".to_string())];

    while let Some((record, parent, location)) = stack.pop() {
        for (i, child) in record.referrals.iter().enumerate() {
            let child_location = || format!("{}.referrals[{}]", location, i);
            let idx = tree.push_child(parent, node_data(child, child_location)?);
            stack.push((child, idx, child_location()));
        }
    }

    debug!("transformed referral tree with {} nodes", tree.len());
    Ok(Some(tree))
}

fn node_data(
    record: &RawReferralRecord,
    location: impl FnOnce() -> String,
) -> DomainResult<NodeData> {
    let name = match record.name.as_deref() {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => {
            return Err(DomainError::MissingName {
                location: location(),
            })
        }
    };
    Ok(NodeData {
        name,
        email: record.email.clone(),
        referral_code: record.referral_code.clone(),
        image: record.image.clone(),
    })
}
