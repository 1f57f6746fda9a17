//! Typed client facade.
//!
//! [`SolrClient`] binds one document type to one core. Queries go through
//! [`QueryParameterBuilder`] and come back through [`ResponseMaterializer`];
//! updates are [`UpdateCommand`]s posted to the update handler.
//!
//! # Examples
//!
//! ```no_run
//! use std::collections::HashMap;
//!
//! use serde::{Deserialize, Serialize};
//! use solrlink::client::SolrClient;
//! use solrlink::config::ClientConfig;
//! use solrlink::query::{Query, QueryOptions};
//! use solrlink::schema::{DocumentSchema, DynamicSlot, FieldDescriptor};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Product {
//!     id: String,
//!     #[serde(rename = "price_", default, skip_deserializing)]
//!     prices: Option<HashMap<String, f32>>,
//! }
//!
//! impl DocumentSchema for Product {
//!     fn fields() -> Vec<FieldDescriptor> {
//!         vec![
//!             FieldDescriptor::scalar("id").as_unique_key(),
//!             FieldDescriptor::map::<Option<HashMap<String, f32>>, _>("prices")
//!                 .with_wire_name("price_"),
//!         ]
//!     }
//!
//!     fn dynamic_slot(&mut self, property: &str) -> Option<&mut dyn DynamicSlot> {
//!         match property {
//!             "prices" => Some(&mut self.prices),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! # async fn example() -> solrlink::error::Result<()> {
//! let client = SolrClient::<Product>::new(ClientConfig::new("http://localhost:8983/solr/products"))?;
//! let results = client.query(&Query::all(), &QueryOptions::new().with_rows(10)).await?;
//! println!("{} of {} products", results.len(), results.num_found);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use log::{debug, info};

use crate::codec::dynamic::DynamicFieldCodec;
use crate::command::{
    AddCommand, AddParameters, CommitCommand, CommitOptions, RollbackCommand, UpdateCommand,
};
use crate::config::ClientConfig;
use crate::error::{Result, SolrLinkError};
use crate::query::{
    FacetFieldQuery, FacetParameters, Query, QueryOptions, QueryParameterBuilder, QuerySerializer,
};
use crate::response::{QueryResults, ResponseHeader, ResponseMaterializer};
use crate::schema::{DocumentSchema, FieldDescriptor};
use crate::transport::{HttpTransport, Transport};

/// Client for one core, typed on its document.
pub struct SolrClient<T> {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    builder: QueryParameterBuilder,
    materializer: ResponseMaterializer,
    _document: PhantomData<fn() -> T>,
}

impl<T> fmt::Debug for SolrClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolrClient")
            .field("document", &std::any::type_name::<T>())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T> Clone for SolrClient<T> {
    fn clone(&self) -> Self {
        SolrClient {
            config: self.config.clone(),
            transport: Arc::clone(&self.transport),
            builder: self.builder.clone(),
            materializer: self.materializer,
            _document: PhantomData,
        }
    }
}

impl<T: DocumentSchema> SolrClient<T> {
    /// Create a client that talks HTTP to `config.base_url`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let config = config.validated()?;
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client over any transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let builder = QueryParameterBuilder::new().with_default_rows(config.default_rows);
        let materializer =
            ResponseMaterializer::new(DynamicFieldCodec::with_key_identity(config.key_identity));
        SolrClient {
            config,
            transport,
            builder,
            materializer,
            _document: PhantomData,
        }
    }

    /// Replace the serializer used for `q`, `fq` and `facet.query`.
    pub fn with_query_serializer(mut self, serializer: Arc<dyn QuerySerializer>) -> Self {
        self.builder = self.builder.with_serializer(serializer);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The field marked as unique key on `T`.
    pub fn unique_key_field(&self) -> Option<FieldDescriptor> {
        T::unique_key()
    }

    /// Run a query against the select handler.
    pub async fn query(&self, query: &Query, options: &QueryOptions) -> Result<QueryResults<T>> {
        let params: Vec<_> = self.builder.build(query, options)?.collect();
        debug!("query {} with {} parameters", query, params.len());

        let raw = self
            .transport
            .get(&self.config.select_handler, &params)
            .await?;
        self.materializer.materialize(&raw)
    }

    /// Term counts of one field over the whole index, without documents.
    pub async fn facet_field_query(&self, facet: FacetFieldQuery) -> Result<Vec<(String, u64)>> {
        let field = facet.field.clone();
        let options = QueryOptions::new()
            .with_rows(0)
            .with_facet(FacetParameters::new([facet]));

        let mut results = self.query(&Query::all(), &options).await?;
        results.facets.facet_fields.remove(&field).ok_or_else(|| {
            SolrLinkError::malformed_facet(format!(
                "response has no counts for facet field '{field}'"
            ))
        })
    }

    pub async fn add(&self, document: &T) -> Result<ResponseHeader> {
        self.add_range(std::slice::from_ref(document), AddParameters::default())
            .await
    }

    /// Add documents in one request, in input order.
    pub async fn add_range(
        &self,
        documents: &[T],
        parameters: AddParameters,
    ) -> Result<ResponseHeader> {
        let command = AddCommand::new(documents)
            .with_parameters(parameters)
            .with_codec(*self.materializer.codec());
        self.send(&command).await
    }

    pub async fn commit(&self, options: CommitOptions) -> Result<ResponseHeader> {
        self.send(&CommitCommand::new(options)).await
    }

    pub async fn rollback(&self) -> Result<ResponseHeader> {
        self.send(&RollbackCommand).await
    }

    async fn send<C: UpdateCommand>(&self, command: &C) -> Result<ResponseHeader> {
        let body = command.payload()?;
        let raw = self
            .transport
            .post(&self.config.update_handler, &command.parameters(), &body)
            .await?;
        let header = ResponseHeader::parse(&raw)?;
        info!("{} done in {} ms", command.name(), header.qtime);
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::Value;

    use super::*;
    use crate::document::GenericDocument;
    use crate::query::QueryParam;

    /// Answers every request with the same body.
    struct FixedTransport(&'static str);

    #[async_trait]
    impl Transport for FixedTransport {
        async fn get(&self, _path: &str, _params: &[QueryParam]) -> Result<String> {
            Ok(self.0.to_string())
        }

        async fn post(&self, _path: &str, _params: &[QueryParam], _body: &Value) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn client(body: &'static str) -> SolrClient<GenericDocument> {
        SolrClient::with_transport(ClientConfig::default(), Arc::new(FixedTransport(body)))
    }

    #[test]
    fn test_facet_field_query_without_counts_fails() {
        let client = client(r#"{"response": {"numFound": 3, "docs": []}}"#);
        let err = tokio_test::block_on(client.facet_field_query(FacetFieldQuery::new("color")))
            .unwrap_err();
        assert!(matches!(err, SolrLinkError::MalformedFacetResponse(_)));
    }

    #[test]
    fn test_update_response_without_header_fails() {
        let client = client(r#"{"ok": true}"#);
        assert!(tokio_test::block_on(client.rollback()).is_err());
    }

    #[test]
    fn test_generic_document_has_no_unique_key() {
        assert!(client("{}").unique_key_field().is_none());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ClientConfig::new("not a url");
        assert!(SolrClient::<GenericDocument>::new(config).is_err());
    }
}
