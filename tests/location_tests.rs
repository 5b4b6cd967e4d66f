use async_trait::async_trait;
use rcheckin::location::{
    Address, Fix, FixedPosition, Geocoder, LocationError, LocationResolver, NoGeocoder,
    PositionProvider, ProviderKind, describe,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

struct FakeProvider {
    kind: ProviderKind,
    enabled: bool,
    cached: Option<Fix>,
    live: Option<(Duration, Fix)>,
    requests: Arc<AtomicUsize>,
}

impl FakeProvider {
    fn new(kind: ProviderKind) -> Self {
        Self {
            kind,
            enabled: true,
            cached: None,
            live: None,
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn cached(mut self, fix: Fix) -> Self {
        self.cached = Some(fix);
        self
    }

    fn live(mut self, after: Duration, fix: Fix) -> Self {
        self.live = Some((after, fix));
        self
    }

    fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

#[async_trait]
impl PositionProvider for FakeProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn last_known(&self) -> Option<Fix> {
        self.cached
    }

    async fn next_fix(&self) -> Result<Fix, LocationError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.live {
            Some((after, fix)) => {
                tokio::time::sleep(after).await;
                Ok(fix)
            }
            None => std::future::pending().await,
        }
    }
}

struct StaticGeocoder(Result<Option<Address>, LocationError>);

impl Geocoder for StaticGeocoder {
    fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<Option<Address>, LocationError> {
        self.0.clone()
    }
}

fn rome() -> Fix {
    Fix::new(41.9, 12.5)
}

fn turin() -> Fix {
    Fix::new(45.07, 7.68)
}

fn resolver() -> LocationResolver {
    LocationResolver::new(Box::new(NoGeocoder))
}

#[tokio::test]
async fn test_no_enabled_provider() {
    let r = resolver()
        .with_provider(Box::new(FakeProvider::new(ProviderKind::Gps).disabled()))
        .with_provider(Box::new(FakeProvider::new(ProviderKind::Network).disabled()));

    assert_eq!(r.locate().await, Err(LocationError::ProvidersDisabled));
    assert_eq!(resolver().locate().await, Err(LocationError::ProvidersDisabled));
}

#[tokio::test]
async fn test_cached_network_fix_wins_over_gps() {
    let gps = FakeProvider::new(ProviderKind::Gps).cached(turin());
    let network = FakeProvider::new(ProviderKind::Network).cached(rome());
    let requests = gps.requests.clone();

    // registration order does not matter
    let r = resolver()
        .with_provider(Box::new(gps))
        .with_provider(Box::new(network));

    assert_eq!(r.locate().await, Ok(rome()));
    assert_eq!(requests.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_cached_gps_fix_used_when_network_has_none() {
    let r = resolver()
        .with_provider(Box::new(FakeProvider::new(ProviderKind::Network)))
        .with_provider(Box::new(FakeProvider::new(ProviderKind::Gps).cached(turin())));

    assert_eq!(r.locate().await, Ok(turin()));
}

#[tokio::test(start_paused = true)]
async fn test_first_live_fix_wins() {
    let network = FakeProvider::new(ProviderKind::Network).live(Duration::from_secs(5), rome());
    let gps = FakeProvider::new(ProviderKind::Gps).live(Duration::from_secs(1), turin());
    let (net_req, gps_req) = (network.requests.clone(), gps.requests.clone());

    let r = resolver()
        .with_provider(Box::new(network))
        .with_provider(Box::new(gps));

    assert_eq!(r.locate().await, Ok(turin()));
    assert_eq!(net_req.load(Ordering::SeqCst), 1);
    assert_eq!(gps_req.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_live_phase_times_out() {
    let r = resolver().with_provider(Box::new(FakeProvider::new(ProviderKind::Gps)));
    assert_eq!(
        r.locate().await,
        Err(LocationError::Timeout(Duration::from_secs(20)))
    );

    let r = resolver()
        .with_provider(Box::new(
            FakeProvider::new(ProviderKind::Gps).live(Duration::from_secs(10), rome()),
        ))
        .with_timeout(Duration::from_secs(3));
    assert_eq!(
        r.locate().await,
        Err(LocationError::Timeout(Duration::from_secs(3)))
    );
}

#[tokio::test]
async fn test_fixed_position_resolves_to_coordinates() {
    let r = resolver().with_provider(Box::new(FixedPosition::new(Some(rome()))));
    let place = r.resolve().await.unwrap();

    assert_eq!(place.address, "41.9, 12.5");
    assert_eq!((place.latitude, place.longitude), (41.9, 12.5));

    let r = resolver().with_provider(Box::new(FixedPosition::new(None)));
    assert_eq!(r.resolve().await, Err(LocationError::ProvidersDisabled));
}

#[test]
fn test_address_parts_joined_by_space() {
    let geocoder = StaticGeocoder(Ok(Some(Address {
        locality: Some("Roma".into()),
        sub_locality: Some("".into()),
        thoroughfare: Some("Via del Corso".into()),
        feature_name: Some("12".into()),
    })));

    assert_eq!(describe(&geocoder, rome()).address, "Roma Via del Corso 12");
}

#[test]
fn test_geocoder_fallback_to_coordinates() {
    let empty = StaticGeocoder(Ok(Some(Address::default())));
    let nothing = StaticGeocoder(Ok(None));
    let failing = StaticGeocoder(Err(LocationError::Geocoder("service down".into())));

    for geocoder in [&empty, &nothing, &failing] {
        let place = describe(geocoder, rome());
        assert_eq!(place.address, "41.9, 12.5");
        assert_eq!(place.latitude, 41.9);
    }
}
