use super::{Fix, Geocoder, LocationError, PositionProvider, ResolvedLocation};
use futures::future::select_ok;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Resolve the current position into an address.
///
/// Cached readings win (network before GPS). Without one, every enabled
/// provider is asked for a live reading at once; the first answer wins and
/// the other requests are dropped. The live phase is bounded by `timeout`.
pub struct LocationResolver {
    providers: Vec<Box<dyn PositionProvider>>,
    geocoder: Box<dyn Geocoder>,
    timeout: Duration,
}

impl LocationResolver {
    pub fn new(geocoder: Box<dyn Geocoder>) -> Self {
        Self {
            providers: Vec::new(),
            geocoder,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_provider(mut self, provider: Box<dyn PositionProvider>) -> Self {
        self.providers.push(provider);
        self.providers.sort_by_key(|p| p.kind());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn resolve(&self) -> Result<ResolvedLocation, LocationError> {
        let fix = self.locate().await?;
        Ok(describe(self.geocoder.as_ref(), fix))
    }

    pub async fn locate(&self) -> Result<Fix, LocationError> {
        let enabled: Vec<&dyn PositionProvider> = self
            .providers
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| p.is_enabled())
            .collect();

        if enabled.is_empty() {
            return Err(LocationError::ProvidersDisabled);
        }

        if let Some(fix) = enabled.iter().find_map(|p| p.last_known()) {
            return Ok(fix);
        }

        let requests = enabled.iter().map(|p| p.next_fix());

        match tokio::time::timeout(self.timeout, select_ok(requests)).await {
            Ok(Ok((fix, _pending))) => Ok(fix),
            Ok(Err(last_error)) => Err(last_error),
            Err(_) => Err(LocationError::Timeout(self.timeout)),
        }
    }
}

/// Turn a fix into display text, falling back to the raw coordinates when
/// the geocoder fails or has nothing useful.
pub fn describe(geocoder: &dyn Geocoder, fix: Fix) -> ResolvedLocation {
    let text = match geocoder.reverse(fix.latitude, fix.longitude) {
        Ok(Some(address)) => address.display_text(),
        Ok(None) | Err(_) => String::new(),
    };

    ResolvedLocation {
        address: if text.is_empty() {
            fix.coordinate_text()
        } else {
            text
        },
        latitude: fix.latitude,
        longitude: fix.longitude,
    }
}
