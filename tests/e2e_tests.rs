//! End-to-end integration tests
//!
//! These tests validate the complete request processing pipeline: CSV
//! requests in, executed-transaction CSV out. Each scenario is run with
//! both the synchronous and the asynchronous strategy; because the async
//! strategy does not guarantee output row order, rows are matched by
//! reference rather than by position.

use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use rust_operators_engine::cli::StrategyType;
use rust_operators_engine::strategy::create_strategy;
use std::collections::HashMap;
use std::io::Write;
use std::str::FromStr;
use tempfile::NamedTempFile;

const HEADER: &str =
    "recipe,operator,source,destination,dest_operator,amount,target_currency,exchange_rate,reference\n";

/// One parsed output row, keyed by column name semantics
struct ResultRow {
    operator: String,
    tx_type: String,
    success: bool,
    final_amount: Decimal,
    fee: Decimal,
    total_commission: Decimal,
    message: String,
}

/// Run a request CSV through the pipeline and index the output by reference
fn run_pipeline(request_rows: &str, strategy_type: StrategyType) -> HashMap<String, ResultRow> {
    let mut input = NamedTempFile::new().expect("Failed to create temp file");
    input
        .write_all(format!("{}{}", HEADER, request_rows).as_bytes())
        .expect("Failed to write requests");
    input.flush().expect("Failed to flush requests");

    let strategy = create_strategy(strategy_type, None);
    let mut output = Vec::new();
    strategy
        .process(input.path(), &mut output)
        .expect("Pipeline failed");

    let mut reader = csv::Reader::from_reader(output.as_slice());
    let mut rows = HashMap::new();
    for record in reader.records() {
        let record = record.expect("Malformed output row");
        rows.insert(
            record[0].to_string(),
            ResultRow {
                operator: record[1].to_string(),
                tx_type: record[2].to_string(),
                success: &record[3] == "true",
                final_amount: Decimal::from_str(&record[5]).expect("bad final_amount"),
                fee: Decimal::from_str(&record[6]).expect("bad fee"),
                total_commission: Decimal::from_str(&record[7]).expect("bad total_commission"),
                message: record[8].to_string(),
            },
        );
    }
    rows
}

#[rstest]
fn test_mixed_operator_batch(
    #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
) {
    let rows = run_pipeline(
        "deposit,bank,CI1234567890,,,60000,,,DEP-1\n\
         quick_transfer,bank,CI1234567890,CI0987654321,,10000,,,QT-1\n\
         withdrawal,microfinance,MF12345678,,,50000,,,WD-1\n\
         bill_payment,mobile_money,0712345678,ELEC-2024,,15000,,,BP-1\n",
        strategy,
    );

    assert_eq!(rows.len(), 4);

    let deposit = &rows["DEP-1"];
    assert!(deposit.success);
    assert_eq!(deposit.operator, "Bank");
    assert_eq!(deposit.tx_type, "deposit");
    assert_eq!(deposit.fee, Decimal::ZERO);

    let quick = &rows["QT-1"];
    assert!(quick.success);
    // bank internal rate: ceil(10,000 * 0.005)
    assert_eq!(quick.fee, dec!(50));
    // express flat commission
    assert_eq!(quick.total_commission, dec!(500));

    let withdrawal = &rows["WD-1"];
    assert!(withdrawal.success);
    assert_eq!(withdrawal.operator, "Microfinance");
    // microfinance withdrawal commission: ceil(50,000 * 0.005)
    assert_eq!(withdrawal.fee, dec!(250));
    // cash-out preset commission: 0.5% with a 200 floor
    assert_eq!(withdrawal.total_commission, dec!(250));

    let bill = &rows["BP-1"];
    assert!(bill.success);
    assert_eq!(bill.tx_type, "bill_payment");
    // mobile money payment rate: ceil(15,000 * 0.01)
    assert_eq!(bill.fee, dec!(150));
    assert_eq!(bill.total_commission, dec!(300));
}

#[rstest]
fn test_full_transfer_commission_arithmetic(
    #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
) {
    let rows = run_pipeline(
        "full_transfer,bank,CI1234567890,CI0987654321,,100000,,,FT-1\n",
        strategy,
    );

    let transfer = &rows["FT-1"];
    assert!(transfer.success);
    assert_eq!(transfer.final_amount, dec!(100000));
    // bank internal rate: ceil(100,000 * 0.005)
    assert_eq!(transfer.fee, dec!(500));
    // processing 1,000 flat + service 0.5% of 100,000
    assert_eq!(transfer.total_commission, dec!(1500));
}

#[rstest]
fn test_inter_operator_transfer_fee_stack(
    #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
) {
    let rows = run_pipeline(
        "inter_operator_transfer,bank,CI1234567890,0712345678,mobile_money,100000,,,IO-1\n",
        strategy,
    );

    let transfer = &rows["IO-1"];
    assert!(transfer.success);
    // base inter-operator fee (0.8%) plus routing surcharge (1%)
    assert_eq!(transfer.fee, dec!(1800));
    // interchange: 1% of 100,000 inside the [500, 5,000] clamps
    assert_eq!(transfer.total_commission, dec!(1000));
}

#[rstest]
fn test_international_transfer_converts_currency(
    #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
) {
    let rows = run_pipeline(
        "international_transfer,bank,CI1234567890,DE4412345678,,655957,EUR,0.0015,IN-1\n",
        strategy,
    );

    let transfer = &rows["IN-1"];
    assert!(transfer.success);
    assert_eq!(transfer.final_amount, dec!(983.9355));
    // fees are computed on the post-conversion amount:
    // ceil(983.9355 * 0.01) + ceil(983.9355 * 0.01)
    assert_eq!(transfer.fee, dec!(20));
    // correspondent 1.5% of 983.9355 plus flat messaging 2,500
    assert_eq!(transfer.total_commission, dec!(2514.7590325));
}

#[rstest]
fn test_policy_failures_are_still_audited(
    #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
) {
    let rows = run_pipeline(
        "withdrawal,bank,BAD-FORMAT,,,10000,,,BAD-1\n\
         full_transfer,microfinance,MF12345678,MF87654321,,1500000,,,BIG-1\n\
         deposit,bank,CI1234567890,,,60000,,,OK-1\n",
        strategy,
    );

    // failed executions are present in the output, not dropped
    assert_eq!(rows.len(), 3);

    let bad_account = &rows["BAD-1"];
    assert!(!bad_account.success);
    assert!(bad_account.message.contains("Invalid Bank account number"));
    assert_eq!(bad_account.total_commission, Decimal::ZERO);

    // 1,500,000 exceeds the microfinance 1,000,000 ceiling
    let over_ceiling = &rows["BIG-1"];
    assert!(!over_ceiling.success);
    assert!(over_ceiling.message.contains("ceiling"));

    assert!(rows["OK-1"].success);
}

#[rstest]
fn test_invalid_exchange_rate_fails_conversion(
    #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
) {
    let rows = run_pipeline(
        "international_transfer,bank,CI1234567890,DE4412345678,,100000,EUR,-2,FX-1\n",
        strategy,
    );

    let transfer = &rows["FX-1"];
    assert!(!transfer.success);
    assert!(transfer.message.contains("Currency conversion failed"));
}

#[rstest]
fn test_microfinance_fee_waiver_end_to_end(
    #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
) {
    let rows = run_pipeline(
        "quick_transfer,microfinance,MF12345678,MF87654321,,8000,,,SMALL-1\n\
         quick_transfer,microfinance,MF12345678,MF87654321,,80000,,,LARGE-1\n",
        strategy,
    );

    // at or below the 10,000 threshold the operator fee is waived
    assert_eq!(rows["SMALL-1"].fee, Decimal::ZERO);
    // above it: ceil(80,000 * 0.01)
    assert_eq!(rows["LARGE-1"].fee, dec!(800));
    // the express commission applies either way
    assert_eq!(rows["SMALL-1"].total_commission, dec!(500));
}

#[rstest]
fn test_malformed_rows_are_skipped(
    #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
) {
    let rows = run_pipeline(
        "deposit,bank,CI1234567890,,,60000,,,OK-1\n\
         instant_loan,bank,CI1234567890,,,60000,,,SKIP-1\n\
         deposit,bank,CI1234567890,,,not_a_number,,,SKIP-2\n\
         quick_transfer,bank,CI1234567890,,,5000,,,SKIP-3\n\
         deposit,mobile_money,0712345678,,,2000,,,OK-2\n",
        strategy,
    );

    // unknown recipe, bad amount and missing destination are all skipped
    assert_eq!(rows.len(), 2);
    assert!(rows.contains_key("OK-1"));
    assert!(rows.contains_key("OK-2"));
}

#[test]
fn test_generated_references_are_assigned_in_order() {
    // sync strategy only: generated references follow input order
    let rows = run_pipeline(
        "deposit,bank,CI1234567890,,,60000,,,\n\
         deposit,bank,CI1234567890,,,70000,,,\n",
        StrategyType::Sync,
    );

    assert_eq!(rows.len(), 2);
    assert!(rows.contains_key("TXN-00000001"));
    assert!(rows.contains_key("TXN-00000002"));
    assert_eq!(rows["TXN-00000001"].final_amount, dec!(60000));
    assert_eq!(rows["TXN-00000002"].final_amount, dec!(70000));
}

#[rstest]
fn test_strategies_agree_per_reference() {
    let requests = "deposit,bank,CI1234567890,,,60000,,,R-1\n\
         full_transfer,bank,CI1234567890,CI0987654321,,100000,,,R-2\n\
         withdrawal,microfinance,MF12345678,,,250000,,,R-3\n\
         inter_operator_transfer,mobile_money,0712345678,CI1234567890,bank,40000,,,R-4\n";

    let sync_rows = run_pipeline(requests, StrategyType::Sync);
    let async_rows = run_pipeline(requests, StrategyType::Async);

    assert_eq!(sync_rows.len(), async_rows.len());
    for (reference, sync_row) in &sync_rows {
        let async_row = &async_rows[reference];
        assert_eq!(sync_row.success, async_row.success, "{}", reference);
        assert_eq!(sync_row.fee, async_row.fee, "{}", reference);
        assert_eq!(
            sync_row.total_commission, async_row.total_commission,
            "{}",
            reference
        );
        assert_eq!(
            sync_row.final_amount, async_row.final_amount,
            "{}",
            reference
        );
    }
}
