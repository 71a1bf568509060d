use crate::resource::ResourceRef;

/// Recreates resources from drawio cells during import.
///
/// Called once per cell with the cell's `id`, `value` and `style`. Returning `None` means the
/// cell is not a resource (structural cells, edges, decorations).
pub trait ResourceFactory {
    fn create_resource(&self, id: &str, value: &str, style: &str) -> Option<ResourceRef>;
}

impl<F> ResourceFactory for F
where
    F: Fn(&str, &str, &str) -> Option<ResourceRef>,
{
    fn create_resource(&self, id: &str, value: &str, style: &str) -> Option<ResourceRef> {
        self(id, value, style)
    }
}
