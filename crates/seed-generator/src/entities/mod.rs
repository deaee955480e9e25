//! Entity catalogue: one variant per target table.
//!
//! Each suite module owns the table layouts and record synthesizers of one
//! index family. Column order in a [`TableSpec`] is the insert order, and
//! every synthesizer emits values in exactly that order.

mod bloom;
mod brin;
mod btree;
mod gin;
mod gist;
mod hash;
mod spgist;

use crate::generator::{RecordSynth, SynthContext};
use seed_core::TableSpec;
use std::fmt;

/// A synthesizable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    BtreeUsers,
    BtreeOrders,
    HashProducts,
    HashSessions,
    HashConfig,
    GistDocuments,
    GistEvents,
    GistNetworkDevices,
    GistLocations,
    SpgistSpatial,
    SpgistMultidimensional,
    SpgistText,
    SpgistNetwork,
    SpgistBoxes,
    GinProducts,
    GinProfiles,
    GinArticles,
    GinDocuments,
    GinLogs,
    BrinTimeSeries,
    BrinAccessLogs,
    BrinTransactions,
    BrinMetrics,
    BrinGeographic,
    BloomUsers,
    BloomProducts,
    BloomOrders,
    BloomSecurityLogs,
    BloomInventory,
}

impl Entity {
    /// Every entity, grouped by suite in load order.
    pub const ALL: [Entity; 29] = [
        Entity::BtreeUsers,
        Entity::BtreeOrders,
        Entity::HashProducts,
        Entity::HashSessions,
        Entity::HashConfig,
        Entity::GistDocuments,
        Entity::GistEvents,
        Entity::GistNetworkDevices,
        Entity::GistLocations,
        Entity::SpgistSpatial,
        Entity::SpgistMultidimensional,
        Entity::SpgistText,
        Entity::SpgistNetwork,
        Entity::SpgistBoxes,
        Entity::GinProducts,
        Entity::GinProfiles,
        Entity::GinArticles,
        Entity::GinDocuments,
        Entity::GinLogs,
        Entity::BrinTimeSeries,
        Entity::BrinAccessLogs,
        Entity::BrinTransactions,
        Entity::BrinMetrics,
        Entity::BrinGeographic,
        Entity::BloomUsers,
        Entity::BloomProducts,
        Entity::BloomOrders,
        Entity::BloomSecurityLogs,
        Entity::BloomInventory,
    ];

    /// Unqualified name of the target table.
    pub fn table_name(&self) -> &'static str {
        match self {
            Entity::BtreeUsers | Entity::BloomUsers => "users",
            Entity::BtreeOrders | Entity::BloomOrders => "orders",
            Entity::HashProducts | Entity::GinProducts | Entity::BloomProducts => "products",
            Entity::HashSessions => "user_sessions",
            Entity::HashConfig => "config",
            Entity::GistDocuments | Entity::GinDocuments => "documents",
            Entity::GistEvents => "events",
            Entity::GistNetworkDevices => "network_devices",
            Entity::GistLocations => "simple_locations",
            Entity::SpgistSpatial => "spatial_data",
            Entity::SpgistMultidimensional => "multidimensional_data",
            Entity::SpgistText => "text_data",
            Entity::SpgistNetwork => "network_data",
            Entity::SpgistBoxes => "bounding_boxes",
            Entity::GinProfiles => "user_profiles",
            Entity::GinArticles => "articles",
            Entity::GinLogs => "log_entries",
            Entity::BrinTimeSeries => "time_series_data",
            Entity::BrinAccessLogs => "access_logs",
            Entity::BrinTransactions => "financial_transactions",
            Entity::BrinMetrics => "system_metrics",
            Entity::BrinGeographic => "geographic_data",
            Entity::BloomSecurityLogs => "security_logs",
            Entity::BloomInventory => "inventory",
        }
    }

    /// Column layout and unique columns of the target table.
    pub fn table(&self) -> TableSpec {
        match self {
            Entity::BtreeUsers => btree::users_table(),
            Entity::BtreeOrders => btree::orders_table(),
            Entity::HashProducts => hash::products_table(),
            Entity::HashSessions => hash::sessions_table(),
            Entity::HashConfig => hash::config_table(),
            Entity::GistDocuments => gist::documents_table(),
            Entity::GistEvents => gist::events_table(),
            Entity::GistNetworkDevices => gist::network_devices_table(),
            Entity::GistLocations => gist::locations_table(),
            Entity::SpgistSpatial => spgist::spatial_table(),
            Entity::SpgistMultidimensional => spgist::multidimensional_table(),
            Entity::SpgistText => spgist::text_table(),
            Entity::SpgistNetwork => spgist::network_table(),
            Entity::SpgistBoxes => spgist::boxes_table(),
            Entity::GinProducts => gin::products_table(),
            Entity::GinProfiles => gin::profiles_table(),
            Entity::GinArticles => gin::articles_table(),
            Entity::GinDocuments => gin::documents_table(),
            Entity::GinLogs => gin::logs_table(),
            Entity::BrinTimeSeries => brin::time_series_table(),
            Entity::BrinAccessLogs => brin::access_logs_table(),
            Entity::BrinTransactions => brin::transactions_table(),
            Entity::BrinMetrics => brin::metrics_table(),
            Entity::BrinGeographic => brin::geographic_table(),
            Entity::BloomUsers => bloom::users_table(),
            Entity::BloomProducts => bloom::products_table(),
            Entity::BloomOrders => bloom::orders_table(),
            Entity::BloomSecurityLogs => bloom::security_logs_table(),
            Entity::BloomInventory => bloom::inventory_table(),
        }
    }

    /// Row count of static tables, which ignore the requested count scale.
    pub fn fixed_rows(&self) -> Option<u64> {
        match self {
            Entity::HashConfig => Some(hash::CONFIG_ENTRIES.len() as u64),
            _ => None,
        }
    }

    /// Record synthesizer for this entity.
    pub(crate) fn synth(&self, ctx: &mut SynthContext) -> Box<dyn RecordSynth> {
        match self {
            Entity::BtreeUsers => Box::new(btree::user),
            Entity::BtreeOrders => Box::new(btree::order),
            Entity::HashProducts => Box::new(hash::product),
            Entity::HashSessions => Box::new(hash::session),
            Entity::HashConfig => Box::new(hash::config_entry),
            Entity::GistDocuments => Box::new(gist::document),
            Entity::GistEvents => Box::new(gist::event),
            Entity::GistNetworkDevices => Box::new(gist::network_device),
            Entity::GistLocations => Box::new(gist::location),
            Entity::SpgistSpatial => Box::new(spgist::spatial_point),
            Entity::SpgistMultidimensional => Box::new(spgist::multidimensional_point),
            Entity::SpgistText => spgist::text_words(ctx),
            Entity::SpgistNetwork => Box::new(spgist::network_address),
            Entity::SpgistBoxes => Box::new(spgist::bounding_box),
            Entity::GinProducts => Box::new(gin::product),
            Entity::GinProfiles => Box::new(gin::profile),
            Entity::GinArticles => Box::new(gin::article),
            Entity::GinDocuments => Box::new(gin::document),
            Entity::GinLogs => Box::new(gin::log_entry),
            Entity::BrinTimeSeries => Box::new(brin::time_series_point),
            Entity::BrinAccessLogs => Box::new(brin::access_log),
            Entity::BrinTransactions => Box::new(brin::transaction),
            Entity::BrinMetrics => Box::new(brin::metric),
            Entity::BrinGeographic => Box::new(brin::geographic_point),
            Entity::BloomUsers => Box::new(bloom::user),
            Entity::BloomProducts => Box::new(bloom::product),
            Entity::BloomOrders => Box::new(bloom::order),
            Entity::BloomSecurityLogs => Box::new(bloom::security_log),
            Entity::BloomInventory => Box::new(bloom::inventory_item),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}
