pub mod balance;
pub mod proxy;

pub use balance::{ChainBalance, FetchResult, WalletAddress};
pub use proxy::ProxyEntry;
