//! `vesta replay`: drive a fresh ledger through a scripted sequence of operations.

use anyhow::bail;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::{Arc, Mutex};
use vesta_ledger::{
    DistributionBatch, DistributionEntry, LedgerConfig, LedgerEvent, LedgerService,
    LedgerSnapshot, TokenLedger,
};
use vesta_nullables::NullClock;
use vesta_types::{AccountAddress, TokenAmount};
use vesta_vesting::ScheduleKind;

/// Amounts in scripts are decimal token strings, e.g. `"12.5"`.
fn tokens<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TokenAmount, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

#[derive(Clone, Debug, Deserialize)]
pub struct ScriptEntry {
    pub recipient: AccountAddress,
    #[serde(deserialize_with = "tokens")]
    pub amount: TokenAmount,
    pub kind: ScheduleKind,
}

/// One scripted operation.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptOp {
    /// Distribute from the issuer; `caller` defaults to the configured issuer.
    Distribute {
        #[serde(default)]
        caller: Option<AccountAddress>,
        entries: Vec<ScriptEntry>,
    },
    Transfer {
        from: AccountAddress,
        to: AccountAddress,
        #[serde(deserialize_with = "tokens")]
        amount: TokenAmount,
    },
    Burn {
        account: AccountAddress,
        #[serde(deserialize_with = "tokens")]
        amount: TokenAmount,
    },
    /// Move the clock forward.
    Advance { secs: u64 },
}

impl ScriptOp {
    fn name(&self) -> &'static str {
        match self {
            Self::Distribute { .. } => "distribute",
            Self::Transfer { .. } => "transfer",
            Self::Burn { .. } => "burn",
            Self::Advance { .. } => "advance",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Rejection {
    pub index: usize,
    pub op: &'static str,
    pub error: String,
}

/// What a replay prints: the final state, every committed event, and the
/// operations that were rejected under `--keep-going`.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub snapshot: LedgerSnapshot,
    pub events: Vec<LedgerEvent>,
    pub rejected: Vec<Rejection>,
}

pub fn parse_script(content: &str) -> anyhow::Result<Vec<ScriptOp>> {
    Ok(serde_json::from_str(content)?)
}

pub fn run(
    config: &LedgerConfig,
    ops: &[ScriptOp],
    start: u64,
    keep_going: bool,
) -> anyhow::Result<ReplayReport> {
    let ledger = TokenLedger::from_config(config)?;
    let clock = Arc::new(NullClock::new(start));
    let service = LedgerService::new(ledger, Arc::clone(&clock));

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    service.subscribe(Box::new(move |event| {
        if let Ok(mut events) = sink.lock() {
            events.push(event.clone());
        }
    }));

    let mut rejected = Vec::new();
    for (index, op) in ops.iter().enumerate() {
        let result = match op {
            ScriptOp::Distribute { caller, entries } => {
                let caller = caller.clone().unwrap_or_else(|| config.issuer.clone());
                let batch = DistributionBatch::new(
                    entries
                        .iter()
                        .map(|e| DistributionEntry {
                            recipient: e.recipient.clone(),
                            amount: e.amount,
                            kind: e.kind,
                        })
                        .collect(),
                );
                service.distribute_batch(&caller, &batch)
            }
            ScriptOp::Transfer { from, to, amount } => service.transfer(from, to, *amount),
            ScriptOp::Burn { account, amount } => service.burn(account, *amount),
            ScriptOp::Advance { secs } => {
                clock.advance(*secs);
                tracing::debug!(now = %clock.now(), "clock advanced");
                Ok(())
            }
        };

        if let Err(e) = result {
            if !keep_going {
                return Err(anyhow::Error::new(e)
                    .context(format!("operation {index} ({}) rejected", op.name())));
            }
            rejected.push(Rejection {
                index,
                op: op.name(),
                error: e.to_string(),
            });
        }
    }

    let snapshot = service.snapshot()?;
    let events = match events.lock() {
        Ok(events) => events.clone(),
        Err(_) => bail!("event collector poisoned"),
    };
    Ok(ReplayReport {
        snapshot,
        events,
        rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"[
        { "op": "distribute", "entries": [
            { "recipient": "alice", "amount": "10", "kind": "immediate" },
            { "recipient": "alice", "amount": "10", "kind": "private-sale" }
        ] },
        { "op": "transfer", "from": "alice", "to": "bob", "amount": "1" },
        { "op": "burn", "account": "alice", "amount": "10" },
        { "op": "advance", "secs": 13 },
        { "op": "burn", "account": "alice", "amount": "10" }
    ]"#;

    fn addr(name: &str) -> AccountAddress {
        AccountAddress::new(name)
    }

    #[test]
    fn parses_every_operation() {
        let ops = parse_script(SCRIPT).unwrap();
        let names: Vec<_> = ops.iter().map(ScriptOp::name).collect();
        assert_eq!(
            names,
            vec!["distribute", "transfer", "burn", "advance", "burn"]
        );
    }

    #[test]
    fn stops_at_first_rejection() {
        let ops = parse_script(SCRIPT).unwrap();
        let err = run(&LedgerConfig::default(), &ops, 0, false).unwrap_err();
        assert!(err.to_string().contains("operation 2 (burn)"));
    }

    #[test]
    fn keep_going_records_rejections() {
        let ops = parse_script(SCRIPT).unwrap();
        let report = run(&LedgerConfig::default(), &ops, 0, true).unwrap();

        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 2);
        assert!(report.rejected[0].error.contains("still locked"));

        let alice = report.snapshot.account(&addr("alice")).unwrap();
        assert_eq!(alice.balance, TokenAmount::from_tokens(9));
        assert_eq!(alice.locked, TokenAmount::ZERO);
        assert_eq!(report.snapshot.total_burned, TokenAmount::from_tokens(10));
        // distributed + grant + transfer + burn
        assert_eq!(report.events.len(), 4);
    }

    #[test]
    fn fractional_amounts_parse() {
        let ops = parse_script(
            r#"[{ "op": "transfer", "from": "issuer", "to": "a", "amount": "0.5" }]"#,
        )
        .unwrap();
        let report = run(&LedgerConfig::default(), &ops, 0, false).unwrap();
        let a = report.snapshot.account(&addr("a")).unwrap();
        assert_eq!(a.balance.to_string(), "0.5");
    }
}
