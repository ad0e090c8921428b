use gridcraft::{HEADER_ROWS, LABEL_COLUMNS, craft_csv_dataset};

mod common;

use common::{T0, T1, T2, fixture_fetcher, parse_csv, protocols};

#[tokio::test]
async fn test_column_count_and_ordering_invariants() {
    let csv = craft_csv_dataset(&fixture_fetcher(), &protocols())
        .await
        .unwrap();
    let matrix = parse_csv(&csv);

    // 3 distinct day buckets across both protocols, however many share one.
    let expected_columns = LABEL_COLUMNS + 3;
    assert!(matrix.iter().all(|row| row.len() == expected_columns));

    // Data columns in strictly ascending bucket order.
    let timestamps: Vec<i64> = matrix[2][LABEL_COLUMNS..]
        .iter()
        .map(|f| f.parse().unwrap())
        .collect();
    assert_eq!(timestamps, vec![T0, T1, T2]);

    // Per protocol: aggregate rows, then Tokens(USD), then Tokens; protocols
    // in input order.
    let kinds: Vec<&str> = matrix[HEADER_ROWS..]
        .iter()
        .map(|row| row[3].as_str())
        .collect();
    assert_eq!(
        kinds,
        vec!["TVL", "TVL", "TVL", "Tokens(USD)", "Tokens(USD)", "Tokens", "TVL"]
    );
    assert_eq!(matrix[3][2], "Total");
    assert_eq!(matrix.last().unwrap()[0], "Aave");
}

#[tokio::test]
async fn test_round_trip_recovers_cells_and_keeps_absence_empty() {
    let csv = craft_csv_dataset(&fixture_fetcher(), &protocols())
        .await
        .unwrap();
    let matrix = parse_csv(&csv);

    // Populated cells come back verbatim.
    assert_eq!(matrix[3][LABEL_COLUMNS..], ["30", "33", ""]);
    assert_eq!(matrix[6][..LABEL_COLUMNS], ["Uniswap", "Dexes", "ethereum", "Tokens(USD)", "WETH"]);
    assert_eq!(matrix[6][LABEL_COLUMNS..], ["4", "5", ""]);
    // Aave only has data on the last two days.
    assert_eq!(matrix[9][LABEL_COLUMNS..], ["", "7", "8"]);

    // USDC appears on day two only; day one is empty, not zero.
    assert_eq!(matrix[7][4], "USDC");
    assert_eq!(matrix[7][LABEL_COLUMNS..], ["", "6", ""]);
    assert!(!csv.contains(",0,"));
}

#[tokio::test]
async fn test_header_rows_carry_dates_and_raw_buckets() {
    let csv = craft_csv_dataset(&fixture_fetcher(), &protocols())
        .await
        .unwrap();
    let matrix = parse_csv(&csv);

    assert_eq!(
        matrix[0],
        ["", "Category", "Chain", "Category", "Token", "", "", ""]
    );
    assert_eq!(matrix[1][0], "Date");
    assert_eq!(
        matrix[1][LABEL_COLUMNS..],
        ["09/03/2022", "10/03/2022", "11/03/2022"]
    );
    assert_eq!(matrix[2][0], "Timestamp");
}

#[tokio::test]
async fn test_no_protocols_yields_header_only_output() {
    let csv = craft_csv_dataset(&fixture_fetcher(), &[]).await.unwrap();

    assert_eq!(
        csv,
        ",Category,Chain,Category,Token\nDate,,,,\nTimestamp,,,,"
    );
}

#[tokio::test]
async fn test_build_twice_identical_output() {
    let fetcher = fixture_fetcher();
    let protocols = protocols();

    let first = craft_csv_dataset(&fetcher, &protocols).await.unwrap();
    let second = craft_csv_dataset(&fetcher, &protocols).await.unwrap();

    assert_eq!(first, second);
}
