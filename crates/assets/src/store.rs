use rustc_hash::FxHashMap;
use serde_json::Value;

/// RGBA8 pixels of a decoded image
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl std::fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Loaded resources by name. Lives as long as the loader.
#[derive(Default, Debug)]
pub struct ResourceStore {
    images: FxHashMap<String, DecodedImage>,
    jsons: FxHashMap<String, Value>,
}

impl ResourceStore {
    pub(crate) fn insert_image(&mut self, name: &str, image: DecodedImage) {
        if self.images.insert(name.to_string(), image).is_some() {
            log::debug!("Image '{name}' replaced");
        }
    }

    pub(crate) fn insert_json(&mut self, name: &str, value: Value) {
        if self.jsons.insert(name.to_string(), value).is_some() {
            log::debug!("Json '{name}' replaced");
        }
    }

    pub fn image(&self, name: &str) -> Option<&DecodedImage> {
        self.images.get(name)
    }

    pub fn json(&self, name: &str) -> Option<&Value> {
        self.jsons.get(name)
    }

    pub fn take_image(&mut self, name: &str) -> Option<DecodedImage> {
        self.images.remove(name)
    }

    pub fn take_json(&mut self, name: &str) -> Option<Value> {
        self.jsons.remove(name)
    }

    pub fn image_names(&self) -> impl Iterator<Item = &str> {
        self.images.keys().map(String::as_str)
    }

    pub fn json_names(&self) -> impl Iterator<Item = &str> {
        self.jsons.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.images.len() + self.jsons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.images.clear();
        self.jsons.clear();
    }
}
