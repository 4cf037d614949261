//! Трэйты на стыках: декодер диалекта и элемент вложенной коллекции.

use crate::{
    classify::Dialect,
    dialects::Resolver,
    encode::WireRecordBuilder,
    keys::CollectionKeys,
    model::Dossier,
};

pub trait DecodeDialect {
    const DIALECT: Dialect;
    type Record;

    fn decode(record: &Self::Record) -> Dossier;
}

/// Элемент вложенной коллекции (строка товара, себестоимость, платёж, контейнер).
pub trait SubEntity: Sized {
    const KEYS: CollectionKeys;

    fn id(&self) -> &str;

    /// Читает поля строки; `id` уже вычислен вызывающим.
    fn decode_row(row: &Resolver<'_>, id: String) -> Self;

    /// Пишет все поля, кроме идентификаторов.
    fn encode_row(&self, out: &mut WireRecordBuilder);
}
