//! Chart service: resolves a location and dispatches chart queries.
//!
//! A single-site query issues one call. A wildcard query spawns one task per
//! site; each task reports `(site, result)` and the outcome lands in the slot
//! at `site.index()`, so the returned order is the registry order no matter
//! which backend answers first. A failing site never cancels its siblings.

use std::sync::Arc;

use tokio::task::JoinSet;

use gridgate_domain::error::BackendError;
use gridgate_domain::location::{Location, Site};
use gridgate_domain::outcome::{ChartResult, SiteOutcome};
use gridgate_domain::selector::{BackendPath, TimeSelector};

use crate::ports::ChartBackend;
use crate::registry::AddressRegistry;

/// Application service dispatching chart queries to site backends.
pub struct ChartService<B> {
    backend: Arc<B>,
    registry: Arc<AddressRegistry>,
}

impl<B> Clone for ChartService<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<B> ChartService<B>
where
    B: ChartBackend + Send + Sync + 'static,
{
    /// Create a new service over `backend`, resolving sites via `registry`.
    pub fn new(backend: B, registry: AddressRegistry) -> Self {
        Self {
            backend: Arc::new(backend),
            registry: Arc::new(registry),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &AddressRegistry {
        &self.registry
    }

    /// Fetch the dataset selected by `selector` for `location`.
    pub async fn query(&self, location: Location, selector: TimeSelector) -> ChartResult {
        self.fetch(location, &selector.backend_path()).await
    }

    /// Fetch `path` from one site, or from every site for [`Location::All`].
    ///
    /// Never fails: backend errors become [`SiteOutcome::Failed`] entries.
    #[tracing::instrument(skip(self, path), fields(path = %path))]
    pub async fn fetch(&self, location: Location, path: &BackendPath) -> ChartResult {
        match location {
            Location::Site(site) => {
                let result = call_site(&*self.backend, &self.registry, site, path).await;
                ChartResult::Single(record(site, result))
            }
            Location::All => ChartResult::All(self.fan_out(path).await),
        }
    }

    async fn fan_out(&self, path: &BackendPath) -> Vec<SiteOutcome> {
        let mut tasks = JoinSet::new();
        for site in Site::ALL {
            let backend = Arc::clone(&self.backend);
            let registry = Arc::clone(&self.registry);
            let path = path.clone();
            tasks.spawn(async move {
                let result = call_site(&*backend, &registry, site, &path).await;
                (site, result)
            });
        }

        let mut slots: Vec<Option<SiteOutcome>> = vec![None; Site::COUNT];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((site, result)) => slots[site.index()] = Some(record(site, result)),
                Err(err) => tracing::error!(%err, "site call task failed"),
            }
        }

        Site::ALL
            .into_iter()
            .zip(slots)
            .map(|(site, slot)| {
                slot.unwrap_or_else(|| SiteOutcome::from(Err(BackendError::Aborted { site })))
            })
            .collect()
    }
}

async fn call_site<B: ChartBackend>(
    backend: &B,
    registry: &AddressRegistry,
    site: Site,
    path: &BackendPath,
) -> Result<serde_json::Value, BackendError> {
    let url = registry.target(site, path)?;
    tracing::debug!(%site, %url, "fetching chart data");
    backend.fetch(&url).await
}

fn record(site: Site, result: Result<serde_json::Value, BackendError>) -> SiteOutcome {
    if let Err(err) = &result {
        tracing::warn!(%site, error = %err, "site call failed");
    }
    SiteOutcome::from(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridgate_domain::address::Address;
    use serde_json::json;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;
    use std::time::Duration;

    enum Reply {
        Json { body: serde_json::Value, delay_ms: u64 },
        Unreachable,
        Panic,
    }

    /// Backend answering by host, recording every URL it is asked for.
    #[derive(Default)]
    struct StubBackend {
        replies: HashMap<&'static str, Reply>,
        calls: Mutex<Vec<String>>,
    }

    impl StubBackend {
        fn reply(mut self, host: &'static str, reply: Reply) -> Self {
            self.replies.insert(host, reply);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ChartBackend for StubBackend {
        fn fetch(
            &self,
            url: &str,
        ) -> impl Future<Output = Result<serde_json::Value, BackendError>> + Send {
            self.calls.lock().unwrap().push(url.to_owned());
            let host = url
                .trim_start_matches("http://")
                .split(':')
                .next()
                .unwrap_or_default();
            let reply = match self.replies.get(host) {
                Some(Reply::Json { body, delay_ms }) => Reply::Json {
                    body: body.clone(),
                    delay_ms: *delay_ms,
                },
                Some(Reply::Panic) => Reply::Panic,
                Some(Reply::Unreachable) | None => Reply::Unreachable,
            };
            let url = url.to_owned();
            async move {
                match reply {
                    Reply::Json { body, delay_ms } => {
                        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                        Ok(body)
                    }
                    Reply::Panic => panic!("backend blew up"),
                    Reply::Unreachable => Err(BackendError::Transport {
                        url,
                        source: "connection refused".into(),
                    }),
                }
            }
        }
    }

    fn full_registry() -> AddressRegistry {
        AddressRegistry::new()
            .with_address(Site::JscTpp, Address::new("jsc"))
            .with_address(Site::TashkentTtc, Address::new("tashkent"))
            .with_address(Site::SirdaryaTpp, Address::new("sirdarya"))
            .with_address(Site::MubarekTpp, Address::new("mubarek"))
    }

    fn json_reply(body: serde_json::Value, delay_ms: u64) -> Reply {
        Reply::Json { body, delay_ms }
    }

    #[tokio::test]
    async fn should_return_single_payload_for_concrete_site() {
        let backend = StubBackend::default().reply("tashkent", json_reply(json!({"mw": 410}), 0));
        let svc = ChartService::new(backend, full_registry());

        let result = svc.query(Site::TashkentTtc.into(), TimeSelector::Last).await;

        assert_eq!(
            result,
            ChartResult::Single(SiteOutcome::Data(json!({"mw": 410})))
        );
        assert_eq!(
            svc.backend.calls(),
            vec!["http://tashkent:8080/data/chart/last/all/".to_string()]
        );
    }

    #[tokio::test]
    async fn should_wrap_backend_failure_for_concrete_site() {
        let backend = StubBackend::default().reply("jsc", Reply::Unreachable);
        let svc = ChartService::new(backend, full_registry());

        let result = svc
            .query(Site::JscTpp.into(), TimeSelector::Year { year: 2024 })
            .await;

        let ChartResult::Single(outcome) = result else {
            panic!("expected a single outcome");
        };
        assert!(outcome.is_failed());
    }

    #[tokio::test]
    async fn should_fail_without_calling_backend_when_address_missing() {
        let registry = full_registry().with_address(Site::SirdaryaTpp, None);
        let svc = ChartService::new(StubBackend::default(), registry);

        let result = svc.query(Site::SirdaryaTpp.into(), TimeSelector::Last).await;

        assert_eq!(
            result,
            ChartResult::Single(SiteOutcome::Failed {
                error: "no address configured for SIRDARYA_TPP".to_string()
            })
        );
        assert!(svc.backend.calls().is_empty());
    }

    #[tokio::test]
    async fn should_preserve_registry_order_when_one_site_is_unreachable() {
        // slowest first, so completion order is the reverse of registry order
        let backend = StubBackend::default()
            .reply("jsc", json_reply(json!("jsc"), 60))
            .reply("tashkent", Reply::Unreachable)
            .reply("sirdarya", json_reply(json!("sirdarya"), 30))
            .reply("mubarek", json_reply(json!("mubarek"), 0));
        let svc = ChartService::new(backend, full_registry());

        let result = svc.query(Location::All, TimeSelector::Last).await;

        let ChartResult::All(outcomes) = result else {
            panic!("expected a fan-out result");
        };
        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0], SiteOutcome::Data(json!("jsc")));
        assert!(outcomes[1].is_failed());
        assert_eq!(outcomes[2], SiteOutcome::Data(json!("sirdarya")));
        assert_eq!(outcomes[3], SiteOutcome::Data(json!("mubarek")));
    }

    #[tokio::test]
    async fn should_issue_one_call_per_resolved_site() {
        let backend = StubBackend::default()
            .reply("jsc", json_reply(json!(1), 0))
            .reply("tashkent", json_reply(json!(2), 0))
            .reply("sirdarya", json_reply(json!(3), 0))
            .reply("mubarek", json_reply(json!(4), 0));
        let registry = full_registry().with_address(Site::MubarekTpp, None);
        let svc = ChartService::new(backend, registry);

        let result = svc
            .query(
                Location::All,
                TimeSelector::Month {
                    year: 2024,
                    month: 9,
                },
            )
            .await;

        let mut calls = svc.backend.calls();
        calls.sort();
        assert_eq!(
            calls,
            vec![
                "http://jsc:8080/data/chart/month/all/2024/09".to_string(),
                "http://sirdarya:8080/data/chart/month/all/2024/09".to_string(),
                "http://tashkent:8080/data/chart/month/all/2024/09".to_string(),
            ]
        );
        let ChartResult::All(outcomes) = result else {
            panic!("expected a fan-out result");
        };
        assert_eq!(
            outcomes[3],
            SiteOutcome::Failed {
                error: "no address configured for MUBAREK_TPP".to_string()
            }
        );
    }

    #[tokio::test]
    async fn should_mark_panicked_call_as_failed_without_dropping_siblings() {
        let backend = StubBackend::default()
            .reply("jsc", json_reply(json!(1), 0))
            .reply("tashkent", json_reply(json!(2), 0))
            .reply("sirdarya", Reply::Panic)
            .reply("mubarek", json_reply(json!(4), 0));
        let svc = ChartService::new(backend, full_registry());

        let result = svc.query(Location::All, TimeSelector::Last).await;

        assert_eq!(
            result,
            ChartResult::All(vec![
                SiteOutcome::Data(json!(1)),
                SiteOutcome::Data(json!(2)),
                SiteOutcome::Failed {
                    error: "call to SIRDARYA_TPP aborted".to_string()
                },
                SiteOutcome::Data(json!(4)),
            ])
        );
    }

    #[tokio::test]
    async fn should_run_fan_out_calls_concurrently() {
        let backend = StubBackend::default()
            .reply("jsc", json_reply(json!(1), 200))
            .reply("tashkent", json_reply(json!(2), 200))
            .reply("sirdarya", json_reply(json!(3), 200))
            .reply("mubarek", json_reply(json!(4), 200));
        let svc = ChartService::new(backend, full_registry());

        let started = std::time::Instant::now();
        svc.query(Location::All, TimeSelector::Last).await;

        assert!(started.elapsed() < Duration::from_millis(700));
    }
}
