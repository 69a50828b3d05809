//! Transaction assembly: fee quote in, signed transaction out.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::adapter::{ChainAdapter, KeySource, SignInput, SignOutput};
use crate::error::EngineError;
use crate::fee::{FeeQuote, PayAmount};

/// Everything needed to turn a chosen [`FeeQuote`] into a transaction.
#[derive(Debug, Clone)]
pub struct TransactionRequest {
    pub recipient: String,
    pub amount: PayAmount,
    pub quote: FeeQuote,
    pub change_address: String,
}

/// The final artifact: serialized transaction hex and its canonical id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltTransaction {
    pub hash: String,
    pub tx: String,
}

/// Assemble and sign a transaction for one request.
///
/// Progression: validate the request, resolve one signing key per chosen
/// input, compute change, lay out outputs, then hand off to the adapter for
/// signing and serialization. Any failure aborts the whole request; nothing
/// partial is ever returned and no shared wallet state is touched.
pub fn make<A: ChainAdapter + ?Sized, K: KeySource + ?Sized>(
    adapter: &A,
    keys: &K,
    request: &TransactionRequest,
) -> Result<BuiltTransaction, EngineError> {
    // Input validation comes before any key resolution.
    if !adapter.validate_address(&request.recipient) {
        return Err(EngineError::InvalidAddress(format!(
            "recipient {:?} is not a valid {} address",
            request.recipient,
            adapter.name()
        )));
    }
    if !adapter.validate_address(&request.change_address) {
        return Err(EngineError::InvalidAddress(format!(
            "change address {:?} is not a valid {} address",
            request.change_address,
            adapter.name()
        )));
    }
    if let PayAmount::Exact(0) = request.amount {
        return Err(EngineError::InvalidAmount("amount must be positive".into()));
    }

    let quote = &request.quote;
    let input_sum: u64 = quote.inputs.iter().map(|u| u.value).sum();
    if input_sum != quote.total {
        return Err(EngineError::InvalidFee(format!(
            "quote total {} does not match its inputs ({input_sum})",
            quote.total
        )));
    }

    // Resolve every signing key up front; partial resolution is never used.
    let mut inputs = Vec::with_capacity(quote.inputs.len());
    for unspent in &quote.inputs {
        let key = keys
            .resolve(&unspent.locator)
            .map_err(|e| EngineError::KeyResolution {
                branch: unspent.locator.branch.as_str(),
                index: unspent.locator.index,
                reason: e.to_string(),
            })?;
        inputs.push(SignInput {
            txid: unspent.txid.clone(),
            vout: unspent.vout,
            value: unspent.value,
            private_key: key.private_key,
            public_key: key.public_key,
        });
    }

    let amount = match request.amount {
        PayAmount::Exact(value) => value,
        PayAmount::All => quote
            .total
            .checked_sub(quote.fee)
            .filter(|a| *a > 0)
            .ok_or(EngineError::InsufficientFunds {
                needed: quote.fee,
                available: quote.total,
            })?,
    };

    let change = quote
        .total
        .checked_sub(amount)
        .and_then(|rest| rest.checked_sub(quote.fee))
        .ok_or(EngineError::InsufficientFunds {
            needed: amount.saturating_add(quote.fee),
            available: quote.total,
        })?;

    // One payment output, plus change only when it is nonzero.
    let mut outputs = vec![SignOutput {
        address: request.recipient.clone(),
        value: amount,
    }];
    if change != 0 {
        outputs.push(SignOutput {
            address: request.change_address.clone(),
            value: change,
        });
    }

    debug!(
        "{}: assembling {} inputs, {} outputs, amount={amount} fee={} change={change}",
        adapter.name(),
        inputs.len(),
        outputs.len(),
        quote.fee
    );

    let signed = adapter
        .sign_and_serialize(&inputs, &outputs)
        .map_err(|e| EngineError::BuildFailed {
            chain: adapter.name(),
            reason: e.to_string(),
        })?;

    Ok(BuiltTransaction {
        hash: signed.hash,
        tx: signed.tx,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::{ResolvedKey, SignError, SignedTx};
    use crate::utxo::{Branch, KeyLocator, SpendableOutput};

    /// Records what reached the signer instead of signing anything.
    struct FakeAdapter {
        fail_signing: bool,
    }

    impl ChainAdapter for FakeAdapter {
        fn name(&self) -> &'static str {
            "fakechain"
        }

        fn is_witness(&self) -> bool {
            false
        }

        fn validate_address(&self, address: &str) -> bool {
            address.starts_with("fk1")
        }

        fn sign_and_serialize(
            &self,
            inputs: &[SignInput],
            outputs: &[SignOutput],
        ) -> Result<SignedTx, SignError> {
            if self.fail_signing {
                return Err(SignError("curve exploded".into()));
            }
            // Encode counts so tests can assert on the layout.
            Ok(SignedTx {
                hash: format!("hash-{}in", inputs.len()),
                tx: format!(
                    "tx-{}out-{}",
                    outputs.len(),
                    outputs
                        .iter()
                        .map(|o| o.value.to_string())
                        .collect::<Vec<_>>()
                        .join("-")
                ),
            })
        }
    }

    struct FakeKeys {
        fail: bool,
    }

    impl KeySource for FakeKeys {
        fn resolve(&self, locator: &KeyLocator) -> Result<ResolvedKey, SignError> {
            if self.fail {
                return Err(SignError(format!("no key at index {}", locator.index)));
            }
            Ok(ResolvedKey {
                private_key: [7u8; 32],
                public_key: [2u8; 33],
            })
        }
    }

    fn utxo(value: u64) -> SpendableOutput {
        SpendableOutput {
            txid: "11".repeat(32),
            vout: 0,
            address: "fk1owner".into(),
            value,
            locator: KeyLocator {
                branch: Branch::External,
                index: 3,
            },
        }
    }

    fn quote(values: &[u64], fee: u64) -> FeeQuote {
        FeeQuote {
            tier: "regular".into(),
            fee,
            fee_rate: 2,
            inputs: values.iter().map(|v| utxo(*v)).collect(),
            total: values.iter().sum(),
            custom: false,
        }
    }

    fn request(amount: PayAmount, quote: FeeQuote) -> TransactionRequest {
        TransactionRequest {
            recipient: "fk1recipient".into(),
            amount,
            quote,
            change_address: "fk1change".into(),
        }
    }

    #[test]
    fn positive_change_emits_two_outputs() {
        let adapter = FakeAdapter { fail_signing: false };
        let req = request(PayAmount::Exact(1_000), quote(&[10_000], 384));
        let built = make(&adapter, &FakeKeys { fail: false }, &req).unwrap();
        assert_eq!(built.hash, "hash-1in");
        // amount 1000 + change 8616
        assert_eq!(built.tx, "tx-2out-1000-8616");
    }

    #[test]
    fn zero_change_emits_single_output() {
        let adapter = FakeAdapter { fail_signing: false };
        let req = request(PayAmount::Exact(9_616), quote(&[10_000], 384));
        let built = make(&adapter, &FakeKeys { fail: false }, &req).unwrap();
        assert_eq!(built.tx, "tx-1out-9616");
    }

    #[test]
    fn send_all_has_one_output_and_no_change() {
        let adapter = FakeAdapter { fail_signing: false };
        let req = request(PayAmount::All, quote(&[10_000, 5_000], 500));
        let built = make(&adapter, &FakeKeys { fail: false }, &req).unwrap();
        assert_eq!(built.hash, "hash-2in");
        assert_eq!(built.tx, "tx-1out-14500");
    }

    #[test]
    fn negative_change_is_an_insufficiency_error() {
        let adapter = FakeAdapter { fail_signing: false };
        let req = request(PayAmount::Exact(9_999), quote(&[10_000], 384));
        match make(&adapter, &FakeKeys { fail: false }, &req) {
            Err(EngineError::InsufficientFunds { needed, available }) => {
                assert_eq!(needed, 10_383);
                assert_eq!(available, 10_000);
            }
            other => panic!("expected InsufficientFunds, got {other:?}"),
        }
    }

    #[test]
    fn near_max_amount_reports_saturated_need() {
        let adapter = FakeAdapter { fail_signing: false };
        let req = request(PayAmount::Exact(u64::MAX), quote(&[10_000], 384));
        match make(&adapter, &FakeKeys { fail: false }, &req) {
            Err(EngineError::InsufficientFunds { needed, available }) => {
                assert_eq!(needed, u64::MAX);
                assert_eq!(available, 10_000);
            }
            other => panic!("expected InsufficientFunds, got {other:?}"),
        }
    }

    #[test]
    fn zero_quote_is_an_insufficiency_error() {
        let adapter = FakeAdapter { fail_signing: false };
        let req = request(PayAmount::Exact(1_000), quote(&[], 0));
        assert!(matches!(
            make(&adapter, &FakeKeys { fail: false }, &req),
            Err(EngineError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn tampered_quote_total_is_invalid() {
        let adapter = FakeAdapter { fail_signing: false };
        let mut q = quote(&[10_000], 384);
        q.total = 20_000;
        let req = request(PayAmount::Exact(1_000), q);
        assert!(matches!(
            make(&adapter, &FakeKeys { fail: false }, &req),
            Err(EngineError::InvalidFee(_))
        ));
    }

    #[test]
    fn zero_amount_is_invalid() {
        let adapter = FakeAdapter { fail_signing: false };
        let req = request(PayAmount::Exact(0), quote(&[10_000], 384));
        assert!(matches!(
            make(&adapter, &FakeKeys { fail: false }, &req),
            Err(EngineError::InvalidAmount(_))
        ));
    }

    #[test]
    fn bad_recipient_fails_before_key_resolution() {
        let adapter = FakeAdapter { fail_signing: false };
        let mut req = request(PayAmount::Exact(1_000), quote(&[10_000], 384));
        req.recipient = "nonsense".into();
        // Keys would fail too; the address error must win.
        match make(&adapter, &FakeKeys { fail: true }, &req) {
            Err(EngineError::InvalidAddress(msg)) => assert!(msg.contains("fakechain")),
            other => panic!("expected InvalidAddress, got {other:?}"),
        }
    }

    #[test]
    fn bad_change_address_is_rejected() {
        let adapter = FakeAdapter { fail_signing: false };
        let mut req = request(PayAmount::Exact(1_000), quote(&[10_000], 384));
        req.change_address = "elsewhere".into();
        assert!(matches!(
            make(&adapter, &FakeKeys { fail: false }, &req),
            Err(EngineError::InvalidAddress(_))
        ));
    }

    #[test]
    fn key_resolution_failure_aborts() {
        let adapter = FakeAdapter { fail_signing: false };
        let req = request(PayAmount::Exact(1_000), quote(&[10_000], 384));
        match make(&adapter, &FakeKeys { fail: true }, &req) {
            Err(EngineError::KeyResolution { branch, index, .. }) => {
                assert_eq!(branch, "external");
                assert_eq!(index, 3);
            }
            other => panic!("expected KeyResolution, got {other:?}"),
        }
    }

    #[test]
    fn signer_fault_wraps_into_build_failed() {
        let adapter = FakeAdapter { fail_signing: true };
        let req = request(PayAmount::Exact(1_000), quote(&[10_000], 384));
        match make(&adapter, &FakeKeys { fail: false }, &req) {
            Err(EngineError::BuildFailed { chain, reason }) => {
                assert_eq!(chain, "fakechain");
                assert!(reason.contains("curve exploded"));
            }
            other => panic!("expected BuildFailed, got {other:?}"),
        }
    }
}
