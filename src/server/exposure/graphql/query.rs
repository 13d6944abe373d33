use super::types::{CustomerType, OrderType, ProductType};
use crate::operations::CrmOperations;
use async_graphql::{Context, ID, Object, Result};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn hello(&self, ctx: &Context<'_>) -> Result<&'static str> {
        Ok(ctx.data::<CrmOperations>()?.hello())
    }

    async fn customer(&self, ctx: &Context<'_>, id: ID) -> Result<Option<CustomerType>> {
        let customer = ctx.data::<CrmOperations>()?.customer(&id).await?;
        Ok(customer.map(CustomerType))
    }

    async fn product(&self, ctx: &Context<'_>, id: ID) -> Result<Option<ProductType>> {
        let product = ctx.data::<CrmOperations>()?.product(&id).await?;
        Ok(product.map(ProductType))
    }

    async fn order(&self, ctx: &Context<'_>, id: ID) -> Result<Option<OrderType>> {
        let order = ctx.data::<CrmOperations>()?.order(&id).await?;
        Ok(order.map(OrderType))
    }

    async fn all_customers(&self, ctx: &Context<'_>) -> Result<Vec<CustomerType>> {
        let customers = ctx.data::<CrmOperations>()?.all_customers().await?;
        Ok(customers.into_iter().map(CustomerType).collect())
    }

    async fn all_products(&self, ctx: &Context<'_>) -> Result<Vec<ProductType>> {
        let products = ctx.data::<CrmOperations>()?.all_products().await?;
        Ok(products.into_iter().map(ProductType).collect())
    }

    async fn all_orders(&self, ctx: &Context<'_>) -> Result<Vec<OrderType>> {
        let orders = ctx.data::<CrmOperations>()?.orders(None).await?;
        Ok(orders.into_iter().map(OrderType).collect())
    }

    /// Orders dated on or after `orderDateGte` (`YYYY-MM-DD` or RFC 3339)
    async fn orders(
        &self,
        ctx: &Context<'_>,
        order_date_gte: Option<String>,
    ) -> Result<Vec<OrderType>> {
        let orders = ctx
            .data::<CrmOperations>()?
            .orders(order_date_gte.as_deref())
            .await?;
        Ok(orders.into_iter().map(OrderType).collect())
    }
}
