pub(crate) mod memory_store;
pub(crate) mod postgres_store;

use memory_store::MemoryUserStore;
use postgres_store::PgUserStore;

#[derive(Clone, Debug)]
pub(crate) enum StoreBackend {
    Postgres(PgUserStore),
    Memory(MemoryUserStore),
}
