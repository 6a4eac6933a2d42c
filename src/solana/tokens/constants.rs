// Known token information
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const TWATAIR_MINT: &str = "5rRs4RckuE19GQ3CtN3Ju4CTRtAahTHuuEuQYqhfBAGS";

pub const TWATAIR_SYMBOL: &str = "$TWATAIR";
pub const TWATAIR_NAME: &str = "TwatAir Coin";
pub const BAGS_TRADING_URL_BASE: &str = "https://bags.fm";

// Define token decimals
pub const SOL_DECIMALS: u8 = 9;
pub const TWATAIR_DECIMALS: u8 = 9;

// Supply figures are fixed at launch
pub const TOTAL_SUPPLY: u64 = 1_000_000_000;
pub const CIRCULATING_SUPPLY: u64 = 690_000_000;
