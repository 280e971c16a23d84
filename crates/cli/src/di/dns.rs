use dohgate_api::AppState;
use dohgate_application::ports::{DnsResolver, RecordLookup, WireCodec};
use dohgate_application::use_cases::{DecodeDohRequestUseCase, HandleDohQueryUseCase};
use dohgate_domain::{GatewayConfig, UpstreamAddr};
use dohgate_infrastructure::dns::{
    CachedLookup, CachingResolver, HickoryWireCodec, NameserverLookup, UpstreamForwarder,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Lambda containers always resolve internally with these settings.
const LAMBDA_CACHE_CAPACITY: usize = 1_000_000;
const LAMBDA_TIMEOUT: Duration = Duration::from_millis(2500);

pub struct DohServices {
    pub handler: Arc<HandleDohQueryUseCase>,
}

impl DohServices {
    pub async fn new(config: &GatewayConfig) -> anyhow::Result<Self> {
        let codec = HickoryWireCodec::shared();

        let resolver: Arc<dyn DnsResolver> = match &config.upstream {
            Some(upstream) => {
                if config.cache_capacity != GatewayConfig::default().cache_capacity {
                    warn!("Cache capacity is ignored when forwarding to an upstream");
                }
                let addr = resolve_upstream(upstream).await?;
                Arc::new(UpstreamForwarder::new(addr, codec.clone()))
            }
            None => {
                let nameservers = resolve_nameservers(&config.nameservers).await?;
                Self::internal_resolver(&nameservers, config.cache_capacity, codec.clone())
            }
        };

        let handler = Self::build_handler(resolver, codec, config, config.timeout());
        info!(
            strategy = handler.strategy_name(),
            timeout_ms = config.query_timeout_ms,
            get_payload = %config.get_payload,
            "DoH handler ready"
        );

        Ok(Self { handler })
    }

    /// Nameserver host names are not resolved here; only literal addresses are used.
    pub fn for_lambda(config: &GatewayConfig) -> Self {
        let codec = HickoryWireCodec::shared();

        let nameservers: Vec<SocketAddr> = config
            .nameservers
            .iter()
            .filter_map(|s| s.parse::<UpstreamAddr>().ok()?.socket_addr())
            .collect();
        if nameservers.len() < config.nameservers.len() {
            warn!("Lambda mode only uses nameservers given as IP:PORT");
        }

        let resolver = Self::internal_resolver(&nameservers, LAMBDA_CACHE_CAPACITY, codec.clone());
        let handler = Self::build_handler(resolver, codec, config, LAMBDA_TIMEOUT);
        info!(
            strategy = handler.strategy_name(),
            nameservers = nameservers.len(),
            "Lambda DoH handler ready"
        );

        Self { handler }
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.handler.clone())
    }

    fn internal_resolver(
        nameservers: &[SocketAddr],
        capacity: usize,
        codec: Arc<dyn WireCodec>,
    ) -> Arc<dyn DnsResolver> {
        let lookup: Arc<dyn RecordLookup> = Arc::new(NameserverLookup::new(nameservers));
        let cached: Arc<dyn RecordLookup> = Arc::new(CachedLookup::new(lookup, capacity));
        Arc::new(CachingResolver::new(cached, codec))
    }

    fn build_handler(
        resolver: Arc<dyn DnsResolver>,
        codec: Arc<dyn WireCodec>,
        config: &GatewayConfig,
        timeout: Duration,
    ) -> Arc<HandleDohQueryUseCase> {
        let decoder = Arc::new(DecodeDohRequestUseCase::new(codec, config.get_payload));
        Arc::new(HandleDohQueryUseCase::new(decoder, resolver, timeout).with_verbose(config.verbose))
    }
}

async fn resolve_upstream(upstream: &str) -> anyhow::Result<SocketAddr> {
    let addr: UpstreamAddr = upstream
        .parse()
        .map_err(|e: String| anyhow::anyhow!("Invalid upstream: {}", e))?;

    if let Some(resolved) = addr.socket_addr() {
        return Ok(resolved);
    }

    let (host, port) = addr
        .unresolved_parts()
        .ok_or_else(|| anyhow::anyhow!("Invalid upstream: {}", upstream))?;
    let resolved = tokio::net::lookup_host((host, port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to resolve upstream {}: {}", upstream, e))?
        .next()
        .ok_or_else(|| anyhow::anyhow!("Upstream {} resolved to no addresses", upstream))?;

    info!(upstream = %upstream, resolved = %resolved, "Resolved upstream host name");
    Ok(resolved)
}

async fn resolve_nameservers(nameservers: &[String]) -> anyhow::Result<Vec<SocketAddr>> {
    let mut resolved = Vec::with_capacity(nameservers.len());
    for server in nameservers {
        resolved.push(resolve_upstream(server).await?);
    }
    Ok(resolved)
}
