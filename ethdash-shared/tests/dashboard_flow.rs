use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use alloy_primitives::U256;
use ethers_core::types::Address;
use rust_decimal::Decimal;
use ethdash_shared::models::errors::SourceError;
use ethdash_shared::models::snapshot::SnapshotFlags;
use ethdash_shared::services::dashboard::Dashboard;
use ethdash_shared::services::snapshot_service::DashContext;
use ethdash_shared::services::surface::{DisplayFlag, MemorySurface, Region};
use ethdash_shared::services::wallet_provider::{accounts_channel, StaticWalletProvider, WalletProvider};
use ethdash_shared::state_machine::connection::ConnectionStatus;
use ethdash_shared::utilities::config::DashConfig;
use ethdash_shared::utilities::exchange::PriceSource;
use ethdash_shared::utilities::gas::GasPriceSource;
use ethdash_shared::utilities::rpc::BalanceSource;

const WALLET_ADDRESS: &str = "0x0E47675D5157aa13FF662E364091B2c5656a6322";

/// Chain and price data the scripted session runs against.
struct FakeNetwork {
    gas_wei: AtomicU64,
    gas_down: AtomicBool,
    price_calls: AtomicUsize,
}

impl FakeNetwork {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            gas_wei: AtomicU64::new(30_000_000_000),
            gas_down: AtomicBool::new(false),
            price_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl BalanceSource for FakeNetwork {
    async fn fetch_balance(&self, _account: &Address) -> Result<U256, SourceError> {
        Ok(U256::from(2_500_000_000_000_000_000u128))
    }
}

#[async_trait::async_trait]
impl GasPriceSource for FakeNetwork {
    async fn fetch_gas_price(&self) -> Result<U256, SourceError> {
        if self.gas_down.load(Ordering::SeqCst) {
            return Err(SourceError::TransportUnavailable("gas oracle down".to_string()));
        }
        Ok(U256::from(self.gas_wei.load(Ordering::SeqCst)))
    }
}

#[async_trait::async_trait]
impl PriceSource for FakeNetwork {
    async fn fetch_price(&self) -> Result<Decimal, SourceError> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Decimal::from(2000))
    }
}

fn session(network: &Arc<FakeNetwork>) -> Dashboard<MemorySurface> {
    let context = DashContext::new(network.clone(), network.clone(), network.clone(), &DashConfig::default());
    let provider: Arc<dyn WalletProvider> = Arc::new(StaticWalletProvider::single(WALLET_ADDRESS));
    Dashboard::new(context, MemorySurface::new(), Some(provider))
}

fn read(dash: &Dashboard<MemorySurface>, region: Region) -> String {
    dash.surface().text(region).unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_scripted_dashboard_session() {
    let _ = env_logger::builder().is_test(true).try_init();
    let network = FakeNetwork::new();
    let mut dash = session(&network);

    // Initial state: disconnected, gas loaded
    dash.start().await;
    assert_eq!(read(&dash, Region::TotalValue), "0.00");
    assert_eq!(read(&dash, Region::EthBalance), "0.0000");
    assert_eq!(
        (read(&dash, Region::GasSlow), read(&dash, Region::GasStandard), read(&dash, Region::GasFast)),
        ("24".to_string(), "30".to_string(), "39".to_string())
    );

    // Connect the wallet
    dash.connect().await.expect("connect should succeed");
    assert_eq!(read(&dash, Region::TotalValue), "5000.00");
    assert_eq!(read(&dash, Region::EthValue), "€5000.00");
    assert_eq!(read(&dash, Region::EthBalance), "2.5000");
    assert_eq!(read(&dash, Region::EthHoldings), "2.5000 ETH");
    assert_eq!(read(&dash, Region::NetworkBadge), "Ethereum");
    assert!(dash.surface().has_flag(Region::StatusDot, DisplayFlag::Online));

    // Refresh gas after the base fee moved
    network.gas_wei.store(12_700_000_000, Ordering::SeqCst);
    let reading = dash.refresh_gas().await;
    assert!(!reading.is_fallback);
    assert_eq!(read(&dash, Region::GasSlow), "10");
    assert_eq!(read(&dash, Region::GasStandard), "12");
    assert_eq!(read(&dash, Region::GasFast), "17");
    assert!(!read(&dash, Region::GasTime).is_empty());

    // Refresh tokens inside the price TTL: no second price lookup
    let snapshot = dash.refresh_tokens().await.expect("connected session refreshes");
    assert!(snapshot.is_complete());
    assert_eq!(network.price_calls.load(Ordering::SeqCst), 1);

    // Final state
    assert!(matches!(dash.status(), ConnectionStatus::Connected { .. }));
    assert_eq!(read(&dash, Region::TotalValue), "5000.00");
    assert!(dash.surface().notifications().is_empty());
}

#[tokio::test]
async fn test_gas_outage_only_degrades_gas() {
    let network = FakeNetwork::new();
    network.gas_down.store(true, Ordering::SeqCst);
    let mut dash = session(&network);

    dash.connect().await.unwrap();
    let snapshot = dash.last_snapshot().expect("snapshot after connect");

    assert_eq!(snapshot.degraded, SnapshotFlags::GAS_FALLBACK);
    assert_eq!(read(&dash, Region::EthValue), "€5000.00");
    assert_eq!(read(&dash, Region::GasSlow), "20");
    assert_eq!(read(&dash, Region::GasStandard), "30");
    assert_eq!(read(&dash, Region::GasFast), "50");
}

#[tokio::test]
async fn test_accounts_changed_notifications_drive_the_session() {
    let network = FakeNetwork::new();
    let mut dash = session(&network);
    let (notifier, mut changes) = accounts_channel();

    dash.connect().await.unwrap();
    notifier.send(vec![WALLET_ADDRESS.to_lowercase()]).unwrap();
    notifier.send(Vec::new()).unwrap();
    drop(notifier);

    while let Some(accounts) = changes.recv().await {
        dash.on_accounts_changed(&accounts).await.unwrap();
    }

    assert_eq!(dash.status(), ConnectionStatus::Disconnected);
    assert_eq!(read(&dash, Region::EthValue), "€0.00");
    assert_eq!(read(&dash, Region::StatusText), "Ready");
}
