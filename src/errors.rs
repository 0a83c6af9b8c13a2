use alloy::{contract, sol_types::SolInterface};

/// Decodes revert data into one of a contract's custom errors.
pub fn decode_revert<E: SolInterface>(data: &[u8]) -> Option<E> {
    E::abi_decode(data).ok()
}

/// Wraps a failed contract call, naming the method and, when the revert data
/// matches one of the contract's custom errors, the decoded error.
pub fn contract_error<E: SolInterface + std::fmt::Debug>(
    err: contract::Error,
    method: &str,
) -> eyre::Report {
    let decoded = err
        .as_revert_data()
        .and_then(|data| decode_revert::<E>(&data));

    match decoded {
        Some(custom) => {
            eyre::Report::new(err).wrap_err(format!("{method} reverted with {custom:?}"))
        }
        None => eyre::Report::new(err).wrap_err(format!("{method} failed")),
    }
}

/// `map_err` adapter for [`contract_error`].
pub fn for_method<E: SolInterface + std::fmt::Debug>(
    method: &'static str,
) -> impl FnOnce(contract::Error) -> eyre::Report {
    move |err| contract_error::<E>(err, method)
}

/// `map_err` adapter for contracts whose ABI declares no custom errors.
pub fn call_failed(method: &'static str) -> impl FnOnce(contract::Error) -> eyre::Report {
    move |err| eyre::Report::new(err).wrap_err(format!("{method} failed"))
}
