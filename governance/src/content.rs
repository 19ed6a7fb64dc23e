//! Proposal content: what executing a passed proposal does.
//!
//! Content travels and rests as a [`ContentEnvelope`], a type URL plus an
//! opaque encoded value. The envelope is what gets stored on the proposal and
//! what duplicate detection compares. [`ProposalContent`] is the decoded form
//! that validation and execution match on exhaustively.

use serde::{Deserialize, Serialize};

use dnsdao_types::{AccountAddress, Coins};

use crate::GovernanceError;

pub const ADD_TLD_TYPE_URL: &str = "/dns.dao.v1.AddTldProposalContent";
pub const REQUEST_TOKENS_TYPE_URL: &str = "/dns.dao.v1.RequestTokensProposalContent";

const MAX_LABEL_LEN: usize = 63;

/// Labels that can never be proposed: ICANN-delegated or special-use TLDs.
pub const RESERVED_TLDS: &[&str] = &[
    // Generic
    "com", "org", "net", "gov", "edu", "mil", "int", "info", "biz", "name", "pro", "aero",
    "coop", "mobi", "cat", "jobs", "tel", "asia", "xyz", "club", "site", "online", "tech",
    "store", "app",
    // Country code
    "io", "co", "us", "uk", "de", "jp", "cn", "in", "br", "ca", "au", "fr", "ru", "it", "es",
    "mx", "ch", "nl", "se", "no", "fi", "dk", "pl", "ar", "at", "be", "kr", "sg", "za",
    // New generic
    "academy", "agency", "accountant", "ai", "bitcoin", "blockchain", "camera", "coffee",
    "company", "computer", "construction", "contact", "cool", "credit", "cruise", "dance",
    "data", "design", "diamond", "digital", "direct", "directory", "discount", "doctor", "dog",
    "domains", "email", "energy", "engineer", "enterprises", "equipment", "estate", "events",
    "expert", "express", "farm", "fashion", "finance", "fitness", "flights", "flowers",
    "foundation", "fund", "furniture", "futbol", "gallery", "gifts", "glass", "global",
    "graphics", "gratis", "green", "gripe", "guide", "guru", "health", "hockey", "holdings",
    "holiday", "home", "hospital", "hotel", "house", "immobilien", "industries", "institute",
    "insure", "international", "investments", "jewelry", "kitchen", "land", "lawyer", "lease",
    "legal", "life", "lighting", "limited", "limo", "link", "living", "loans", "london", "ltd",
    "luxury", "management", "marketing", "media", "medical", "men", "money", "movie", "music",
    "network", "news", "ninja", "partners",
    // Special use
    "example", "invalid", "local", "localhost", "test", "arpa",
];

/// Lower-case and strip surrounding dots.
pub fn normalize_tld(tld: &str) -> String {
    tld.trim_matches('.').to_ascii_lowercase()
}

pub fn is_reserved_tld(tld: &str) -> bool {
    RESERVED_TLDS.contains(&normalize_tld(tld).as_str())
}

/// Check that an already-normalised label is a syntactically valid DNS label.
fn validate_label(label: &str) -> Result<(), GovernanceError> {
    if label.is_empty() {
        return Err(GovernanceError::InvalidProposalContent(
            "TLD in proposal content cannot be empty".into(),
        ));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(GovernanceError::InvalidProposalContent(format!(
            "TLD '{label}' exceeds {MAX_LABEL_LEN} characters"
        )));
    }
    if !label
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return Err(GovernanceError::InvalidProposalContent(format!(
            "TLD '{label}' contains characters outside [a-z0-9-]"
        )));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(GovernanceError::InvalidProposalContent(format!(
            "TLD '{label}' cannot start or end with a hyphen"
        )));
    }
    Ok(())
}

/// Grant a new top-level label permission in the domain registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTldProposalContent {
    pub tld: String,
}

/// Mint tokens to a recipient for an activity, granting voting power lots for
/// the voting-denom part of the amount.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTokensProposalContent {
    pub recipient: String,
    pub amount_requested: Coins,
    pub activity_description: String,
}

impl RequestTokensProposalContent {
    pub fn recipient_address(&self) -> Result<AccountAddress, GovernanceError> {
        AccountAddress::parse(&self.recipient).map_err(|e| {
            GovernanceError::InvalidAddress(format!("invalid recipient address in proposal content: {e}"))
        })
    }
}

/// Decoded proposal content, one variant per kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProposalContent {
    AddTld(AddTldProposalContent),
    RequestTokens(RequestTokensProposalContent),
}

impl ProposalContent {
    pub fn add_tld(tld: impl Into<String>) -> Self {
        ProposalContent::AddTld(AddTldProposalContent { tld: tld.into() })
    }

    pub fn request_tokens(
        recipient: impl Into<String>,
        amount_requested: Coins,
        activity_description: impl Into<String>,
    ) -> Self {
        ProposalContent::RequestTokens(RequestTokensProposalContent {
            recipient: recipient.into(),
            amount_requested,
            activity_description: activity_description.into(),
        })
    }

    /// Short kind name used in events and queries.
    pub fn proposal_type(&self) -> &'static str {
        match self {
            ProposalContent::AddTld(_) => "AddTld",
            ProposalContent::RequestTokens(_) => "RequestTokens",
        }
    }

    pub fn type_url(&self) -> &'static str {
        match self {
            ProposalContent::AddTld(_) => ADD_TLD_TYPE_URL,
            ProposalContent::RequestTokens(_) => REQUEST_TOKENS_TYPE_URL,
        }
    }

    pub fn is_add_tld(&self) -> bool {
        matches!(self, ProposalContent::AddTld(_))
    }

    /// Stateless validation of the content fields.
    pub fn validate_basic(&self) -> Result<(), GovernanceError> {
        match self {
            ProposalContent::AddTld(c) => {
                let label = normalize_tld(&c.tld);
                validate_label(&label)?;
                if is_reserved_tld(&label) {
                    return Err(GovernanceError::InvalidProposalContent(format!(
                        "TLD '{label}' is reserved by ICANN and cannot be proposed"
                    )));
                }
                Ok(())
            }
            ProposalContent::RequestTokens(c) => {
                c.recipient_address()?;
                c.amount_requested.validate().map_err(|e| {
                    GovernanceError::InvalidProposalContent(format!(
                        "invalid amount requested in proposal content: {e}"
                    ))
                })?;
                if !c.amount_requested.is_all_positive() {
                    return Err(GovernanceError::InvalidProposalContent(
                        "requested amount in proposal content must be positive".into(),
                    ));
                }
                if c.activity_description.trim().is_empty() {
                    return Err(GovernanceError::InvalidProposalContent(
                        "activity description in proposal content cannot be empty".into(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// The canonical form that gets stored: TLD labels are normalised so that
    /// `"Example."` and `"example"` are the same proposal.
    pub fn canonical(self) -> Self {
        match self {
            ProposalContent::AddTld(c) => ProposalContent::AddTld(AddTldProposalContent {
                tld: normalize_tld(&c.tld),
            }),
            other => other,
        }
    }

    pub fn pack(&self) -> Result<ContentEnvelope, GovernanceError> {
        let value = match self {
            ProposalContent::AddTld(c) => bincode::serialize(c)?,
            ProposalContent::RequestTokens(c) => bincode::serialize(c)?,
        };
        Ok(ContentEnvelope {
            type_url: self.type_url().to_string(),
            value,
        })
    }
}

/// Type-tagged encoded content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEnvelope {
    pub type_url: String,
    pub value: Vec<u8>,
}

impl ContentEnvelope {
    /// Decode the payload. Unknown type URLs are an error, never skipped.
    pub fn unpack(&self) -> Result<ProposalContent, GovernanceError> {
        let undecodable =
            |e: bincode::Error| GovernanceError::ContentUnpack(format!("{}: {e}", self.type_url));
        match self.type_url.as_str() {
            ADD_TLD_TYPE_URL => Ok(ProposalContent::AddTld(
                bincode::deserialize(&self.value).map_err(undecodable)?,
            )),
            REQUEST_TOKENS_TYPE_URL => Ok(ProposalContent::RequestTokens(
                bincode::deserialize(&self.value).map_err(undecodable)?,
            )),
            other => Err(GovernanceError::ContentUnpack(format!(
                "unknown proposal content type: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnsdao_types::Coin;

    const RECIPIENT: &str = "dns1qqqqqqqqqqqqqqqq";

    fn grant(amount: u128) -> ProposalContent {
        ProposalContent::request_tokens(
            RECIPIENT,
            Coins::from_coin(Coin::new("udnsc", amount)).unwrap(),
            "community outreach",
        )
    }

    #[test]
    fn tld_labels_are_normalised_and_checked() {
        assert!(ProposalContent::add_tld(".Alpha.").validate_basic().is_ok());
        assert!(ProposalContent::add_tld("dao-1").validate_basic().is_ok());

        for bad in ["", "..", "-dao", "dao-", "da_o", "dao.net", &"a".repeat(64)] {
            let err = ProposalContent::add_tld(bad).validate_basic().unwrap_err();
            assert!(
                matches!(err, GovernanceError::InvalidProposalContent(_)),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn reserved_tlds_are_rejected() {
        for reserved in ["com", "COM", ".io.", "localhost", "arpa"] {
            assert!(is_reserved_tld(reserved));
            assert!(ProposalContent::add_tld(reserved).validate_basic().is_err());
        }
        assert!(!is_reserved_tld("dnsdao"));
    }

    #[test]
    fn request_tokens_validation() {
        grant(5).validate_basic().unwrap();

        let bad_recipient = ProposalContent::request_tokens(
            "cosmos1xyz",
            Coins::from_coin(Coin::new("udnsc", 5)).unwrap(),
            "x",
        );
        assert!(matches!(
            bad_recipient.validate_basic(),
            Err(GovernanceError::InvalidAddress(_))
        ));

        let empty_amount = ProposalContent::request_tokens(RECIPIENT, Coins::empty(), "x");
        assert!(matches!(
            empty_amount.validate_basic(),
            Err(GovernanceError::InvalidProposalContent(_))
        ));

        let no_description = ProposalContent::request_tokens(
            RECIPIENT,
            Coins::from_coin(Coin::new("udnsc", 5)).unwrap(),
            "   ",
        );
        assert!(matches!(
            no_description.validate_basic(),
            Err(GovernanceError::InvalidProposalContent(_))
        ));
    }

    #[test]
    fn envelope_roundtrip_preserves_kind() {
        let content = grant(42);
        let envelope = content.pack().unwrap();
        assert_eq!(envelope.type_url, REQUEST_TOKENS_TYPE_URL);
        assert_eq!(envelope.unpack().unwrap(), content);
    }

    #[test]
    fn unknown_type_url_is_a_hard_error() {
        let envelope = ContentEnvelope {
            type_url: "/dns.dao.v1.TextProposal".into(),
            value: vec![],
        };
        assert!(matches!(envelope.unpack(), Err(GovernanceError::ContentUnpack(_))));
    }

    #[test]
    fn garbage_value_is_an_unpack_error() {
        let envelope = ContentEnvelope {
            type_url: REQUEST_TOKENS_TYPE_URL.into(),
            value: vec![0xff; 3],
        };
        assert!(matches!(envelope.unpack(), Err(GovernanceError::ContentUnpack(_))));
    }

    #[test]
    fn canonical_form_makes_equivalent_labels_identical() {
        let a = ProposalContent::add_tld("Alpha.").canonical().pack().unwrap();
        let b = ProposalContent::add_tld("alpha").canonical().pack().unwrap();
        assert_eq!(a, b);
    }
}
