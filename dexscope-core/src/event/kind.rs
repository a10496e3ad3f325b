use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    PumpFunTrade,
    PumpFunCreate,
    PumpFunComplete,
    PumpFunMigrate,
    PumpSwapBuy,
    PumpSwapSell,
    RaydiumAmmV4Swap,
    RaydiumClmmSwap,
    RaydiumCpmmSwap,
    OrcaWhirlpoolSwap,
    BonkTrade,
    MeteoraDammV2Swap,
    BlockMeta,
    /// A single top-level tag this client has no label for.
    Unknown(String),
    /// Not a single-key object.
    Untagged,
}

/// (wire tag, kind, label, icon)
static KNOWN: &[(&str, EventKind, &str, &str)] = &[
    ("PumpFunTrade", EventKind::PumpFunTrade, "PumpFun Trade", "🔥"),
    ("PumpFunCreate", EventKind::PumpFunCreate, "PumpFun Create", "🆕"),
    ("PumpFunComplete", EventKind::PumpFunComplete, "PumpFun Complete", "🏁"),
    ("PumpFunMigrate", EventKind::PumpFunMigrate, "PumpFun Migrate", "🚚"),
    ("PumpSwapBuy", EventKind::PumpSwapBuy, "PumpSwap Buy", "🟢"),
    ("PumpSwapSell", EventKind::PumpSwapSell, "PumpSwap Sell", "🔴"),
    ("RaydiumAmmV4Swap", EventKind::RaydiumAmmV4Swap, "Raydium AMM V4 Swap", "💧"),
    ("RaydiumClmmSwap", EventKind::RaydiumClmmSwap, "Raydium CLMM Swap", "💦"),
    ("RaydiumCpmmSwap", EventKind::RaydiumCpmmSwap, "Raydium CPMM Swap", "🫧"),
    ("OrcaWhirlpoolSwap", EventKind::OrcaWhirlpoolSwap, "Orca Whirlpool Swap", "🌊"),
    ("BonkTrade", EventKind::BonkTrade, "Bonk Trade", "🐕"),
    ("MeteoraDammV2Swap", EventKind::MeteoraDammV2Swap, "Meteora DAMM V2 Swap", "☄️"),
    ("BlockMeta", EventKind::BlockMeta, "Block Meta", "🧱"),
];

impl EventKind {
    pub fn from_tag(tag: &str) -> Self {
        KNOWN
            .iter()
            .find(|(wire, ..)| *wire == tag)
            .map(|(_, kind, ..)| kind.clone())
            .unwrap_or_else(|| EventKind::Unknown(tag.to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, EventKind::Unknown(_) | EventKind::Untagged)
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            EventKind::Unknown(tag) => Some(tag.as_str()),
            EventKind::Untagged => None,
            known => KNOWN
                .iter()
                .find(|(_, kind, ..)| kind == known)
                .map(|(wire, ..)| *wire),
        }
    }

    pub fn label(&self) -> &str {
        self.entry().map(|(_, _, label, _)| *label).unwrap_or("Unknown Event Type")
    }

    pub fn icon(&self) -> &str {
        self.entry().map(|(_, _, _, icon)| *icon).unwrap_or("❓")
    }

    fn entry(&self) -> Option<&'static (&'static str, EventKind, &'static str, &'static str)> {
        KNOWN.iter().find(|(_, kind, ..)| kind == self)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tag() {
            Some(tag) => f.write_str(tag),
            None => f.write_str("untagged"),
        }
    }
}
