//! Slug allocation

use kernel::id::ProductId;

use crate::domain::repository::ProductRepository;
use crate::domain::value_object::slug::Slug;
use crate::error::CatalogResult;

/// First free slug among `base`, `base-2`, `base-3`, ...
///
/// `except` lets a product keep or reclaim its own slug on update.
pub async fn allocate_slug<P>(
    repo: &P,
    name: &str,
    except: Option<&ProductId>,
) -> CatalogResult<Slug>
where
    P: ProductRepository,
{
    let base = Slug::from_name(name);
    let mut candidate = base.clone();
    let mut counter = 1;

    while repo.slug_taken(&candidate, except).await? {
        counter += 1;
        candidate = base.with_suffix(counter);
    }
    Ok(candidate)
}
