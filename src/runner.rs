//! CSV batch driver for the splitter engine.
//!
//! Streams operation records in order and applies each to a [`Splitter`],
//! paying withdrawals into an in-memory recorder. Rejected operations are
//! logged at warn level and skipped; the batch continues, mirroring how the
//! engine scopes every failure to the single aborted operation.
//!
//! # Output Ordering
//!
//! The final report is sorted by account address in ascending byte order to
//! ensure deterministic, reproducible output.

use crate::address::Address;
use crate::engine::Splitter;
use crate::error::Result;
use crate::operation::{OpKind, OperationRecord, ParsedOperation};
use crate::payout::MemoryPayouts;
use csv::{ReaderBuilder, Trim};
use log::warn;
use std::collections::BTreeSet;
use std::io::{Read, Write};

/// Applies an operations CSV to a [`Splitter`] and reports final state.
pub struct SplitterRunner {
    splitter: Splitter,
    payouts: MemoryPayouts,
}

impl SplitterRunner {
    /// Creates a runner around a fresh engine with the given deployer.
    pub fn new(deployer: Address) -> Self {
        SplitterRunner {
            splitter: Splitter::new(deployer),
            payouts: MemoryPayouts::new(),
        }
    }

    /// Returns the engine driven by this runner.
    pub fn splitter(&self) -> &Splitter {
        &self.splitter
    }

    /// Returns the payout recorder withdrawals are paid into.
    pub fn payouts(&self) -> &MemoryPayouts {
        &self.payouts
    }

    /// Processes operations from a CSV reader in streaming fashion.
    ///
    /// Records are read one at a time to minimize memory usage. Invalid
    /// records and rejected operations are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<OperationRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => {
                    if let Some(operation) = record.parse() {
                        if let Err(e) = self.apply(operation) {
                            warn!("Row {}: {}", row_num, e);
                        }
                    } else {
                        warn!("Row {}: Unrecognized operation record, rejecting", row_num);
                    }
                }
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Applies a single parsed operation.
    fn apply(&mut self, operation: ParsedOperation) -> Result<()> {
        let sender = operation.sender;
        match operation.kind {
            OpKind::Split {
                first,
                second,
                value,
            } => {
                self.splitter.split(sender, first, second, value)?;
            }
            OpKind::SplitBalance { first, second } => {
                self.splitter.split_balance(sender, first, second)?;
            }
            OpKind::Withdraw => {
                self.splitter.withdraw(sender, &mut self.payouts)?;
            }
            OpKind::Pause => {
                self.splitter.pause(sender)?;
            }
            OpKind::Unpause => {
                self.splitter.unpause(sender)?;
            }
            OpKind::AddPauser { account } => {
                self.splitter.add_pauser(sender, account)?;
            }
            OpKind::RenouncePauser => {
                self.splitter.renounce_pauser(sender)?;
            }
        }
        Ok(())
    }

    /// Writes the final account states to CSV.
    ///
    /// Covers every account that holds a ledger entry, received a payout,
    /// or currently holds the pauser role, sorted by address.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["account", "balance", "withdrawn", "pauser"])?;

        let mut accounts: BTreeSet<Address> = self.splitter.ledger_accounts().collect();
        accounts.extend(self.payouts.accounts());
        accounts.extend(self.splitter.pausers());

        for account in accounts {
            csv_writer.write_record([
                account.to_string(),
                self.splitter.balance_of(account).to_string(),
                self.payouts.paid_to(account).to_string(),
                self.splitter.is_pauser(account).to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const ALICE: &str = "0x00000000000000000000000000000000000000a1";
    const BOB: &str = "0x00000000000000000000000000000000000000b0";
    const CAROL: &str = "0x00000000000000000000000000000000000000c0";
    const DAVE: &str = "0x00000000000000000000000000000000000000d0";

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    fn process_csv_str(csv: &str) -> SplitterRunner {
        let mut runner = SplitterRunner::new(addr(ALICE));
        runner.process_csv(Cursor::new(csv)).unwrap();
        runner
    }

    #[test]
    fn test_split_then_withdraw_batch() {
        let csv = format!(
            "op,sender,first,second,value\n\
             split,{ALICE},{BOB},{CAROL},333\n\
             withdraw,{BOB},,,\n"
        );

        let runner = process_csv_str(&csv);

        assert_eq!(runner.splitter().balance_of(addr(BOB)), 0);
        assert_eq!(runner.splitter().balance_of(addr(CAROL)), 166);
        assert_eq!(runner.payouts().paid_to(addr(BOB)), 167);
    }

    #[test]
    fn test_rejected_rows_are_skipped() {
        // Row 2 is rejected (sender is a recipient), row 3 is an unknown
        // operation; row 4 still applies.
        let csv = format!(
            "op,sender,first,second,value\n\
             split,{BOB},{BOB},{CAROL},10\n\
             deposit,{ALICE},{BOB},{CAROL},10\n\
             split,{ALICE},{BOB},{CAROL},10\n"
        );

        let runner = process_csv_str(&csv);

        assert_eq!(runner.splitter().balance_of(addr(BOB)), 5);
        assert_eq!(runner.splitter().balance_of(addr(CAROL)), 5);
        assert_eq!(runner.splitter().total_held(), 10);
    }

    #[test]
    fn test_pause_batch_blocks_splits_but_not_withdrawals() {
        let csv = format!(
            "op,sender,first,second,value\n\
             split,{DAVE},{BOB},{CAROL},100\n\
             pause,{ALICE},,,\n\
             split,{DAVE},{BOB},{CAROL},50\n\
             withdraw,{BOB},,,\n\
             unpause,{ALICE},,,\n\
             split,{DAVE},{BOB},{CAROL},7\n"
        );

        let runner = process_csv_str(&csv);

        assert_eq!(runner.splitter().balance_of(addr(BOB)), 4);
        assert_eq!(runner.splitter().balance_of(addr(CAROL)), 53);
        assert_eq!(runner.payouts().paid_to(addr(BOB)), 50);
        assert!(!runner.splitter().is_paused());
    }

    #[test]
    fn test_role_management_batch() {
        let csv = format!(
            "op,sender,first,second,value\n\
             add_pauser,{ALICE},{DAVE},,\n\
             pause,{DAVE},,,\n\
             unpause,{DAVE},,,\n\
             renounce_pauser,{DAVE},,,\n\
             pause,{DAVE},,,\n"
        );

        let runner = process_csv_str(&csv);

        assert!(!runner.splitter().is_pauser(addr(DAVE)));
        // The final pause came from a renounced member and was rejected.
        assert!(!runner.splitter().is_paused());
    }

    #[test]
    fn test_whitespace_handling() {
        let csv = format!(
            "op, sender, first, second, value\n\
             split, {DAVE}, {BOB}, {CAROL}, 101\n"
        );

        let runner = process_csv_str(&csv);

        assert_eq!(runner.splitter().balance_of(addr(BOB)), 51);
        assert_eq!(runner.splitter().balance_of(addr(CAROL)), 50);
    }

    #[test]
    fn test_output_sorted_by_account() {
        let csv = format!(
            "op,sender,first,second,value\n\
             split,{DAVE},{CAROL},{BOB},10\n"
        );

        let runner = process_csv_str(&csv);
        let mut output = Vec::new();
        runner.write_output(&mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "account,balance,withdrawn,pauser");
        // ALICE (pauser, no balance) sorts first, then BOB, then CAROL.
        assert_eq!(lines[1], format!("{ALICE},0,0,true"));
        assert_eq!(lines[2], format!("{BOB},5,0,false"));
        assert_eq!(lines[3], format!("{CAROL},5,0,false"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_output_includes_paid_out_accounts() {
        let csv = format!(
            "op,sender,first,second,value\n\
             split,{ALICE},{BOB},{CAROL},100\n\
             withdraw,{BOB},,,\n"
        );

        let runner = process_csv_str(&csv);
        let mut output = Vec::new();
        runner.write_output(&mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains(&format!("{BOB},0,50,false")));
    }

    #[test]
    fn test_empty_csv_reports_only_deployer() {
        let runner = process_csv_str("op,sender,first,second,value\n");
        let mut output = Vec::new();
        runner.write_output(&mut output).unwrap();
        let output = String::from_utf8(output).unwrap();

        assert_eq!(output.lines().count(), 2);
        assert!(output.contains(&format!("{ALICE},0,0,true")));
    }
}
