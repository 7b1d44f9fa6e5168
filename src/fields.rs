use crate::error::UnknownField;
use crate::text::scrub;

/// Canonical column a detail-page label maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    OffenceId,
    TradingName,
    Address,
    Council,
    OffenceDate,
    OffenceCode,
    OffenceNature,
    PenaltyAmount,
    PartyServed,
    DateServed,
    IssuedBy,
    Notes,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::OffenceId,
        Field::TradingName,
        Field::Address,
        Field::Council,
        Field::OffenceDate,
        Field::OffenceCode,
        Field::OffenceNature,
        Field::PenaltyAmount,
        Field::PartyServed,
        Field::DateServed,
        Field::IssuedBy,
        Field::Notes,
    ];

    pub fn column(self) -> &'static str {
        match self {
            Field::OffenceId => "offence_id",
            Field::TradingName => "trading_name",
            Field::Address => "address",
            Field::Council => "council",
            Field::OffenceDate => "offence_date",
            Field::OffenceCode => "offence_code",
            Field::OffenceNature => "offence_nature",
            Field::PenaltyAmount => "penalty_amount",
            Field::PartyServed => "party_served",
            Field::DateServed => "date_served",
            Field::IssuedBy => "issued_by",
            Field::Notes => "notes",
        }
    }
}

/// Site label -> field. Order matters: the fallback scan takes the first
/// label contained in the page's text.
pub const LABELS: &[(&str, Field)] = &[
    ("Penalty notice number", Field::OffenceId),
    ("Trade name of party served", Field::TradingName),
    ("Address(where offence occurred)", Field::Address),
    ("Council(where offence occurred)", Field::Council),
    ("Date of alleged offence", Field::OffenceDate),
    ("Offence code", Field::OffenceCode),
    ("Nature & circumstances of alleged offence", Field::OffenceNature),
    ("Amount of penalty", Field::PenaltyAmount),
    ("Name of party served", Field::PartyServed),
    ("Date penalty notice served", Field::DateServed),
    ("Issued by", Field::IssuedBy),
    ("Notes", Field::Notes),
];

pub fn map_label(raw_label: &str) -> Result<Field, UnknownField> {
    let label = scrub(raw_label);
    if label.is_empty() {
        return Err(UnknownField { label });
    }

    if let Some((_, field)) = LABELS.iter().find(|(known, _)| *known == label) {
        return Ok(*field);
    }

    LABELS
        .iter()
        .find(|(known, _)| label.contains(known))
        .map(|(_, field)| *field)
        .ok_or(UnknownField { label })
}
