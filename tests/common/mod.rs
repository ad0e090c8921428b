use gridcraft::enums::dataset::SeriesKind;
use gridcraft::fetcher::InMemoryFetcher;
use gridcraft::{PartialRecord, Protocol};

// 2022-03-09 .. 2022-03-11, 00:00:00 UTC
pub const T0: i64 = 1646784000;
pub const T1: i64 = 1646870400;
pub const T2: i64 = 1646956800;

pub fn protocols() -> Vec<Protocol> {
    vec![
        Protocol::new("uniswap", "Uniswap", "Dexes"),
        Protocol::new("aave", "Aave", "Lending"),
    ]
}

/// Two protocols with overlapping history: Uniswap tracks two chains plus
/// token breakdowns, Aave reports aggregate-only on a partly disjoint set
/// of days.
pub fn fixture_fetcher() -> InMemoryFetcher {
    InMemoryFetcher::new()
        .seed(
            "uniswap",
            SeriesKind::DailyTvl,
            vec![
                PartialRecord::new(T0)
                    .with_scalar("tvl", 30)
                    .with_scalar("ethereum", 20)
                    .with_scalar("polygon", 10),
                PartialRecord::new(T1)
                    .with_scalar("tvl", 33)
                    .with_scalar("ethereum", 22)
                    .with_scalar("polygon", 11),
            ],
        )
        .seed(
            "uniswap",
            SeriesKind::DailyUsdTokenTvl,
            vec![
                PartialRecord::new(T0).with_nested("ethereum", "WETH", 4),
                PartialRecord::new(T1)
                    .with_nested("ethereum", "WETH", 5)
                    .with_nested("ethereum", "USDC", 6),
            ],
        )
        .seed(
            "uniswap",
            SeriesKind::DailyTokenTvl,
            vec![
                PartialRecord::new(T0).with_nested("ethereum", "WETH", 2),
                PartialRecord::new(T1).with_nested("ethereum", "WETH", 2),
            ],
        )
        .seed(
            "aave",
            SeriesKind::DailyTvl,
            vec![
                PartialRecord::new(T1).with_scalar("ethereum", 7),
                PartialRecord::new(T2).with_scalar("ethereum", 8),
            ],
        )
}

/// Splits delimited output back into a field matrix.
pub fn parse_csv(csv: &str) -> Vec<Vec<String>> {
    csv.lines()
        .map(|line| line.split(',').map(str::to_string).collect())
        .collect()
}
