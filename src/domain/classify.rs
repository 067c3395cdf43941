use crate::domain::model::TransactionKind;

/// 交易列表中金額前面的符號
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySign {
    Plus,
    Minus,
    None,
}

impl DisplaySign {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplaySign::Plus => "+",
            DisplaySign::Minus => "-",
            DisplaySign::None => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorCategory {
    Green,
    Red,
    Amber,
    Blue,
    Purple,
    Orange,
    Gray,
}

impl ColorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorCategory::Green => "green",
            ColorCategory::Red => "red",
            ColorCategory::Amber => "amber",
            ColorCategory::Blue => "blue",
            ColorCategory::Purple => "purple",
            ColorCategory::Orange => "orange",
            ColorCategory::Gray => "gray",
        }
    }

    /// ANSI SGR color code for terminal output.
    pub fn ansi_code(&self) -> &'static str {
        match self {
            ColorCategory::Green => "32",
            ColorCategory::Red => "31",
            ColorCategory::Amber => "33",
            ColorCategory::Blue => "34",
            ColorCategory::Purple => "35",
            ColorCategory::Orange => "91",
            ColorCategory::Gray => "90",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionDisplay {
    pub sign: DisplaySign,
    pub color: ColorCategory,
}

pub fn classify(kind: &TransactionKind) -> TransactionDisplay {
    let (sign, color) = match kind {
        TransactionKind::Credit => (DisplaySign::Plus, ColorCategory::Green),
        TransactionKind::Release => (DisplaySign::Plus, ColorCategory::Blue),
        TransactionKind::Refund => (DisplaySign::Plus, ColorCategory::Purple),
        TransactionKind::Debit => (DisplaySign::Minus, ColorCategory::Red),
        TransactionKind::Escrow => (DisplaySign::Minus, ColorCategory::Amber),
        TransactionKind::Withdrawal => (DisplaySign::Minus, ColorCategory::Orange),
        TransactionKind::Other(_) => (DisplaySign::None, ColorCategory::Gray),
    };
    TransactionDisplay { sign, color }
}
