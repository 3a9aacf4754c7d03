//! Sample in-boundary service used by the `aoplog` binary.
//!
//! Every public method goes through an [`Instrumented`] handle built once in
//! [`Ledger::new`]; the business logic inside the closures knows nothing
//! about logging.

use anyhow::{Result, anyhow};

use crate::core::types::{MethodMeta, ReplaceMode};
use crate::interceptor::{Instrumented, Interceptor};
use crate::io::sink::Sink;

pub const LEDGER_TYPE: &str = "org::example::core::ledger::Ledger";

fn ledger_method(method: &str) -> MethodMeta {
    MethodMeta::new(LEDGER_TYPE, method)
}

pub struct Ledger<S> {
    balance: i64,
    accounts: Vec<String>,
    deposit: Instrumented<S>,
    withdraw: Instrumented<S>,
    find_account: Instrumented<S>,
    reset: Instrumented<S>,
    audit: Instrumented<S>,
    forecast: Instrumented<S>,
    to_string: Instrumented<S>,
}

impl<S: Sink + Clone> Ledger<S> {
    pub fn new(interceptor: &Interceptor<S>) -> Self {
        Self {
            balance: 0,
            accounts: vec!["main".to_string()],
            deposit: interceptor.method(ledger_method("deposit").params(["i64"]).returns("i64")),
            withdraw: interceptor
                .method(ledger_method("withdraw").params(["i64"]).returns("i64")),
            find_account: interceptor.method(
                ledger_method("find_account")
                    .params(["&str"])
                    .returns("Option<String>"),
            ),
            reset: interceptor.method(ledger_method("reset").no_log()),
            audit: interceptor.method(
                ledger_method("audit")
                    .returns("i64")
                    .replace(ReplaceMode::Proceed),
            ),
            forecast: interceptor.method(
                ledger_method("forecast")
                    .params(["u32"])
                    .returns("i64")
                    .replace(ReplaceMode::NoProceed),
            ),
            to_string: interceptor.method(ledger_method("to_string").returns("String")),
        }
    }
}

impl<S: Sink> Ledger<S> {
    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn deposit(&mut self, amount: i64) -> Result<i64> {
        self.deposit.call(&[&amount], || {
            if amount <= 0 {
                return Err(anyhow!("deposit must be positive, got {amount}"));
            }
            self.balance += amount;
            Ok(self.balance)
        })
    }

    pub fn withdraw(&mut self, amount: i64) -> Result<i64> {
        self.withdraw.call(&[&amount], || {
            if amount > self.balance {
                return Err(anyhow!(
                    "insufficient funds: balance {}, requested {amount}",
                    self.balance
                ));
            }
            self.balance -= amount;
            Ok(self.balance)
        })
    }

    pub fn find_account(&self, name: &str) -> Result<Option<String>> {
        self.find_account.call(&[&name], || {
            Ok(self.accounts.iter().find(|account| *account == name).cloned())
        })
    }

    pub fn reset(&mut self) -> Result<()> {
        self.reset.call_void(&[], || {
            self.balance = 0;
            Ok(())
        })
    }

    pub fn audit(&self) -> Result<i64> {
        self.audit.call(&[], || Ok(self.balance))
    }

    /// Projected balance; replaced by a stub that always yields `0`.
    pub fn forecast(&self, months: u32) -> Result<i64> {
        self.forecast
            .call(&[&months], || Ok(self.balance * i64::from(months)))
    }

    pub fn summary(&self) -> Result<String> {
        self.to_string
            .call(&[], || Ok(format!("Ledger(balance={})", self.balance)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matcher::Boundary;
    use crate::core::types::AdviceDecision;
    use crate::test_support::RecordingSink;

    #[test]
    fn methods_get_expected_advice() {
        let sink = RecordingSink::default();
        let ledger = Ledger::new(&Interceptor::new(&sink, Boundary::default()));
        assert_eq!(ledger.deposit.decision(), AdviceDecision::LogAroundProceed);
        assert_eq!(ledger.reset.decision(), AdviceDecision::ProceedSilently);
        assert_eq!(ledger.audit.decision(), AdviceDecision::ReplaceAndProceed);
        assert_eq!(ledger.forecast.decision(), AdviceDecision::ReplaceNoProceed);
        assert_eq!(ledger.to_string.decision(), AdviceDecision::Unmatched);
    }

    #[test]
    fn business_logic_is_unchanged_by_interception() {
        let sink = RecordingSink::default();
        let mut ledger = Ledger::new(&Interceptor::new(&sink, Boundary::default()));

        assert_eq!(ledger.deposit(100).expect("deposit"), 100);
        assert_eq!(ledger.withdraw(30).expect("withdraw"), 70);
        assert!(ledger.withdraw(500).is_err());
        assert_eq!(ledger.balance(), 70);
        assert_eq!(ledger.audit().expect("audit"), 70);
        assert_eq!(ledger.forecast(12).expect("forecast"), 0);
        assert_eq!(ledger.summary().expect("summary"), "Ledger(balance=70)");
        ledger.reset().expect("reset");
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn outside_boundary_logs_nothing() {
        let sink = RecordingSink::default();
        let mut ledger = Ledger::new(&Interceptor::new(&sink, Boundary::new("acme::engine")));

        ledger.deposit(5).expect("deposit");
        assert!(ledger.withdraw(50).is_err());

        assert!(sink.lines().is_empty());
    }
}
