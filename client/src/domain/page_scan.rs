//! Walking paged listings until an element turns up.

use std::future::Future;

use pagination::{Page, PageRequest};
use tracing::warn;

use super::ports::BackendApiError;

/// Upper bound on pages fetched by one scan.
const MAX_SCANNED_PAGES: usize = 50;

/// Fetch pages of `size` elements from the first onwards and return the
/// first element matching `wanted`.
///
/// Stops at the last page, at a page whose successor cannot be requested,
/// or after [`MAX_SCANNED_PAGES`] pages when the backend keeps reporting
/// further ones.
pub(crate) async fn find_in_pages<T, F, Fut>(
    size: u32,
    mut fetch: F,
    mut wanted: impl FnMut(&T) -> bool,
) -> Result<Option<T>, BackendApiError>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<T>, BackendApiError>>,
{
    let mut request = PageRequest::first(size);
    for _ in 0..MAX_SCANNED_PAGES {
        let page = fetch(request).await?;
        let next = page.next_request();
        let info = page.page_info;
        if let Some(found) = page.content.into_iter().find(|item| wanted(item)) {
            return Ok(Some(found));
        }
        match next {
            Some(following) => request = following,
            None => {
                if info.has_next {
                    warn!(
                        page = info.page,
                        size = info.size,
                        "listing reports further pages but carries no usable page size"
                    );
                }
                break;
            }
        }
    }
    Ok(None)
}
