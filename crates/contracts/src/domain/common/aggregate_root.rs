use super::AggregateId;

/// Трейт для корня агрегата
///
/// Every record fetched from the backend exposes its identity, a business
/// code and a display description, plus static metadata used to build
/// endpoint paths and tab titles.
pub trait AggregateRoot {
    /// Тип идентификатора агрегата
    type Id: AggregateId;

    // ============================================================================
    // Методы экземпляра
    // ============================================================================

    fn id(&self) -> Self::Id;

    /// Бизнес-код записи (código do cliente, código do produto...)
    fn code(&self) -> &str;

    fn description(&self) -> &str;

    // ============================================================================
    // Метаданные класса агрегата
    // ============================================================================

    /// Индекс агрегата в системе (например, "a002")
    fn aggregate_index() -> &'static str;

    /// REST collection segment (for example "clientes")
    fn collection_name() -> &'static str;

    /// Singular UI name, for example "Cliente"
    fn element_name() -> &'static str;

    /// Plural UI name, for example "Clientes"
    fn list_name() -> &'static str;

    // ============================================================================
    // Методы с реализацией по умолчанию
    // ============================================================================

    /// Полное имя агрегата (например, "a002_clientes"), used as tab key prefix
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    fn api_path() -> String {
        format!("/api/{}", Self::collection_name())
    }

    fn record_path(&self) -> String {
        format!("{}/{}", Self::api_path(), self.id().as_string())
    }
}
