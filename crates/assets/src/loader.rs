use crate::config::LoaderConfig;
use crate::decode::{decode_image, decode_json};
use crate::descriptor::{DescriptorId, ResourceDescriptor, ResourceKind};
use crate::error::LoadError;
use crate::manifest::Manifest;
use crate::queue::PendingQueue;
use crate::report::{BatchReport, Settlement};
use crate::source::{DefaultSource, Source};
use crate::store::{DecodedImage, ResourceStore};
use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::task::{Context, Poll, noop_waker_ref};
use serde::de::DeserializeOwned;
use serde_json::Value;

enum Resource {
    Image(DecodedImage),
    Json(Value),
}

type ResourceFuture = LocalBoxFuture<'static, Result<Resource, LoadError>>;
type OnComplete = Box<dyn FnOnce(&BatchReport)>;

/// Loads batches of named images and json documents.
///
/// Descriptors stay in the pending queue until they load successfully, so a
/// failed descriptor is retried by the next batch. Resources are kept in the
/// store across batches until taken or cleared.
pub struct ResourceLoader {
    config: LoaderConfig,
    source: Box<dyn Source>,
    pending: PendingQueue,
    store: ResourceStore,
    batch: Option<Batch>,
    last_report: Option<BatchReport>,
}

impl ResourceLoader {
    /// Loader reading from the platform's default source
    pub fn new() -> Result<Self, LoadError> {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Result<Self, LoadError> {
        let source = DefaultSource::new(&config)?;
        Ok(Self::with_source(config, source))
    }

    pub fn with_source<S: Source + 'static>(config: LoaderConfig, source: S) -> Self {
        Self {
            config,
            source: Box::new(source),
            pending: PendingQueue::default(),
            store: ResourceStore::default(),
            batch: None,
            last_report: None,
        }
    }

    /// Queues an image. Names are not deduplicated, the last one loaded wins.
    pub fn register_image(&mut self, name: &str, locator: &str) -> DescriptorId {
        log::debug!("Registering image '{name}' from '{locator}'");
        self.pending.push(ResourceKind::Image, name, locator)
    }

    /// Queues a json document. Names are not deduplicated, the last one loaded wins.
    pub fn register_json(&mut self, name: &str, locator: &str) -> DescriptorId {
        log::debug!("Registering json '{name}' from '{locator}'");
        self.pending.push(ResourceKind::Json, name, locator)
    }

    /// Queues every entry of the manifest, images first
    pub fn register_manifest(&mut self, manifest: &Manifest) -> Vec<DescriptorId> {
        let images = manifest
            .images
            .iter()
            .map(|(name, locator)| self.register_image(name, locator))
            .collect::<Vec<_>>();

        let jsons = manifest
            .json
            .iter()
            .map(|(name, locator)| self.register_json(name, locator))
            .collect::<Vec<_>>();

        [images, jsons].concat()
    }

    pub fn register_manifest_str(&mut self, text: &str) -> Result<Vec<DescriptorId>, LoadError> {
        let manifest = Manifest::from_json(text)?;
        Ok(self.register_manifest(&manifest))
    }

    /// Starts loading everything pending.
    ///
    /// `on_complete` is called exactly once from [`update`](Self::update),
    /// after every descriptor of the batch settled, even when some failed.
    pub fn load_all<F>(&mut self, on_complete: F) -> Result<(), LoadError>
    where
        F: FnOnce(&BatchReport) + 'static,
    {
        if self.batch.is_some() {
            log::warn!("Cannot start a batch while another one is loading");
            return Err(LoadError::BatchInFlight);
        }

        let loading = self
            .dispatch()
            .into_iter()
            .map(|(descriptor, fut)| LoadWrapper::new(descriptor, fut))
            .collect();

        self.batch = Some(Batch {
            loading,
            report: BatchReport::default(),
            on_complete: Box::new(on_complete),
        });

        Ok(())
    }

    /// Like [`load_all`](Self::load_all) but `on_complete` only fires when
    /// every resource loaded. Failures are logged.
    pub fn load_all_strict<F>(&mut self, on_complete: F) -> Result<(), LoadError>
    where
        F: FnOnce() + 'static,
    {
        self.load_all(move |report| {
            if report.is_success() {
                on_complete();
                return;
            }

            report.failed().for_each(|(settlement, err)| {
                log::warn!("Batch aborted by '{}': {err}", settlement.name());
            });
        })
    }

    /// Loads everything pending and resolves once the whole batch settled
    pub async fn load_all_async(&mut self) -> Result<BatchReport, LoadError> {
        if self.batch.is_some() {
            log::warn!("Cannot start a batch while another one is loading");
            return Err(LoadError::BatchInFlight);
        }

        let mut tasks = self
            .dispatch()
            .into_iter()
            .map(|(descriptor, fut)| async move { (descriptor, fut.await) })
            .collect::<FuturesUnordered<_>>();

        let mut report = BatchReport::default();
        while let Some((descriptor, res)) = tasks.next().await {
            let settlement = self.settle(descriptor, res);
            report.push(settlement);
        }

        log::debug!("Batch of {} resources done", report.len());
        self.last_report = Some(report.clone());
        Ok(report)
    }

    /// Polls the current batch. Returns `true` when this call completed it.
    pub fn update(&mut self) -> bool {
        // take it out to settle while iterating
        let Some(mut batch) = self.batch.take() else {
            return false;
        };

        let mut needs_clean = false;
        for wrapper in batch.loading.iter_mut() {
            if let Some(res) = wrapper.try_load() {
                let settlement = self.settle(wrapper.descriptor.clone(), res);
                batch.report.push(settlement);
                needs_clean = true;
            }
        }

        if needs_clean {
            batch.loading.retain(|wrapper| !wrapper.is_loaded());
        }

        if !batch.loading.is_empty() {
            self.batch = Some(batch);
            return false;
        }

        let Batch {
            report,
            on_complete,
            ..
        } = batch;

        log::debug!("Batch of {} resources done", report.len());
        on_complete(&report);
        self.last_report = Some(report);
        true
    }

    /// True while a batch started with [`load_all`](Self::load_all) has not completed
    pub fn is_loading(&self) -> bool {
        self.batch.is_some()
    }

    /// Descriptors of the current batch still waiting for their fetch
    pub fn in_flight(&self) -> usize {
        self.batch.as_ref().map_or(0, |batch| batch.loading.len())
    }

    /// Report of the last completed batch
    pub fn last_report(&self) -> Option<&BatchReport> {
        self.last_report.as_ref()
    }

    pub fn pending(&self) -> &PendingQueue {
        &self.pending
    }

    pub fn pending_images(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.pending.images()
    }

    pub fn pending_jsons(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.pending.jsons()
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn store(&self) -> &ResourceStore {
        &self.store
    }

    pub fn image(&self, name: &str) -> Option<&DecodedImage> {
        self.store.image(name)
    }

    pub fn json(&self, name: &str) -> Option<&Value> {
        self.store.json(name)
    }

    /// Deserializes a loaded json document, `None` if it is not loaded
    pub fn json_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, LoadError> {
        let Some(value) = self.store.json(name) else {
            return Ok(None);
        };

        T::deserialize(value)
            .map(Some)
            .map_err(|e| LoadError::parse(name, e))
    }

    /// Removes and returns a loaded image, transferring ownership to the caller
    pub fn take_image(&mut self, name: &str) -> Option<DecodedImage> {
        self.store.take_image(name)
    }

    /// Removes and returns a loaded json document, transferring ownership to the caller
    pub fn take_json(&mut self, name: &str) -> Option<Value> {
        self.store.take_json(name)
    }

    /// Clears all loaded resources, pending descriptors are kept
    pub fn clear(&mut self) {
        self.store.clear();
    }

    fn dispatch(&self) -> Vec<(ResourceDescriptor, ResourceFuture)> {
        let batch = self.pending.snapshot();
        log::debug!("Loading batch of {} resources", batch.len());

        batch
            .into_iter()
            .map(|descriptor| {
                let fut = self.fetch(&descriptor);
                (descriptor, fut)
            })
            .collect()
    }

    fn fetch(&self, descriptor: &ResourceDescriptor) -> ResourceFuture {
        let locator = self.config.resolve(&descriptor.locator);
        log::debug!(
            "Fetching {} '{}' from '{locator}'",
            descriptor.kind,
            descriptor.name
        );

        let bytes = self.source.fetch(&locator);
        let kind = descriptor.kind;
        Box::pin(async move {
            let bytes = bytes.await?;
            match kind {
                ResourceKind::Image => decode_image(&locator, &bytes).map(Resource::Image),
                ResourceKind::Json => decode_json(&locator, &bytes).map(Resource::Json),
            }
        })
    }

    fn settle(
        &mut self,
        descriptor: ResourceDescriptor,
        res: Result<Resource, LoadError>,
    ) -> Settlement {
        match res {
            Ok(resource) => {
                match resource {
                    Resource::Image(img) => self.store.insert_image(&descriptor.name, img),
                    Resource::Json(value) => self.store.insert_json(&descriptor.name, value),
                }

                self.pending.remove(descriptor.kind, descriptor.id);
                log::info!("Loaded {} '{}'", descriptor.kind, descriptor.name);
                Settlement::loaded(descriptor)
            }
            Err(err) => {
                log::warn!("Cannot load {} '{}': {err}", descriptor.kind, descriptor.name);
                Settlement::failed(descriptor, err)
            }
        }
    }
}

struct Batch {
    loading: Vec<LoadWrapper>,
    report: BatchReport,
    on_complete: OnComplete,
}

struct LoadWrapper {
    descriptor: ResourceDescriptor,
    fut: ResourceFuture,
    loaded: bool,
}

impl LoadWrapper {
    fn new(descriptor: ResourceDescriptor, fut: ResourceFuture) -> Self {
        Self {
            descriptor,
            fut,
            loaded: false,
        }
    }

    fn try_load(&mut self) -> Option<Result<Resource, LoadError>> {
        if self.loaded {
            return None;
        }

        let mut ctx = Context::from_waker(noop_waker_ref());
        match self.fut.as_mut().poll(&mut ctx) {
            Poll::Ready(res) => {
                self.loaded = true;
                Some(res)
            }
            Poll::Pending => None,
        }
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }
}
