use super::types::{
    BulkCreateCustomersPayload, CreateCustomerPayload, CreateOrderPayload, CreateProductPayload,
    CustomerInput, OrderInput, ProductInput, UpdateLowStockProductsPayload,
};
use crate::operations::CrmOperations;
use async_graphql::{Context, Object, Result};

/// Mutations report validation failures in their payload, never as
/// GraphQL errors.
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_customer(
        &self,
        ctx: &Context<'_>,
        input: CustomerInput,
    ) -> Result<CreateCustomerPayload> {
        let ops = ctx.data::<CrmOperations>()?;
        Ok(ops.create_customer(input.into()).await.into())
    }

    async fn bulk_create_customers(
        &self,
        ctx: &Context<'_>,
        input: Vec<CustomerInput>,
    ) -> Result<BulkCreateCustomersPayload> {
        let ops = ctx.data::<CrmOperations>()?;
        let inputs = input.into_iter().map(Into::into).collect();
        Ok(ops.bulk_create_customers(inputs).await.into())
    }

    async fn create_product(
        &self,
        ctx: &Context<'_>,
        input: ProductInput,
    ) -> Result<CreateProductPayload> {
        let ops = ctx.data::<CrmOperations>()?;
        Ok(ops.create_product(input.into()).await.into())
    }

    async fn create_order(&self, ctx: &Context<'_>, input: OrderInput) -> Result<CreateOrderPayload> {
        let ops = ctx.data::<CrmOperations>()?;
        Ok(ops.create_order(input.into()).await.into())
    }

    async fn update_low_stock_products(
        &self,
        ctx: &Context<'_>,
    ) -> Result<UpdateLowStockProductsPayload> {
        let ops = ctx.data::<CrmOperations>()?;
        Ok(ops.update_low_stock_products().await.into())
    }
}
