use sea_orm::{EntityTrait, QuerySelect, Select};

use foodgram_domain::pagination::PageRequest;

/// Apply `OFFSET`/`LIMIT` for a clamped [`PageRequest`].
pub trait WithPage {
    fn with_page(self, page: PageRequest) -> Self;
}

impl<E> WithPage for Select<E>
where
    E: EntityTrait,
{
    fn with_page(self, page: PageRequest) -> Self {
        let page = page.clamped();
        QuerySelect::offset(self, page.offset()).limit(u64::from(page.limit))
    }
}
