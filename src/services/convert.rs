use chrono::Utc;

use crate::{
    entity::{
        order_items::Model as OrderItemModel, orders::Model as OrderModel,
        products::Model as ProductModel, support_tickets::Model as TicketModel,
        users::Model as UserModel,
    },
    error::{AppError, AppResult},
    models::{
        Order, OrderItem, OrderStatus, Product, Role, SellerType, SupportTicket, User,
        VerificationStatus,
    },
};

fn corrupt(field: &str, err: String) -> AppError {
    AppError::Internal(anyhow::anyhow!("stored {field} is invalid: {err}"))
}

pub(crate) fn parse_order_status(raw: &str) -> AppResult<OrderStatus> {
    raw.parse::<OrderStatus>().map_err(|e| corrupt("order status", e))
}

pub(crate) fn user_from_entity(model: UserModel) -> AppResult<User> {
    let role = model
        .role
        .parse::<Role>()
        .map_err(|e| corrupt("user role", e))?;
    let verification_status = model
        .verification_status
        .as_deref()
        .map(str::parse::<VerificationStatus>)
        .transpose()
        .map_err(|e| corrupt("verification status", e))?;
    let seller_type = model
        .seller_type
        .as_deref()
        .map(str::parse::<SellerType>)
        .transpose()
        .map_err(|e| corrupt("seller type", e))?;
    let verification_documents: Vec<String> =
        serde_json::from_value(model.verification_documents)
            .map_err(|e| corrupt("verification documents", e.to_string()))?;

    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        address: model.address,
        logo: model.logo,
        role,
        is_admin: model.is_admin,
        verification_status,
        company_name: model.company_name,
        inn: model.inn,
        verification_requested_at: model
            .verification_requested_at
            .map(|dt| dt.with_timezone(&Utc)),
        verification_approved_at: model
            .verification_approved_at
            .map(|dt| dt.with_timezone(&Utc)),
        verification_rejected_at: model
            .verification_rejected_at
            .map(|dt| dt.with_timezone(&Utc)),
        verification_rejection_reason: model.verification_rejection_reason,
        seller_type,
        passport_number: model.passport_number,
        passport_issued_by: model.passport_issued_by,
        passport_issue_date: model.passport_issue_date,
        verification_documents,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

pub(crate) fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        image_url: model.image_url,
        is_published: model.is_published,
        seller_id: model.seller_id,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

pub(crate) fn order_from_entity(model: OrderModel) -> AppResult<Order> {
    Ok(Order {
        id: model.id,
        status: parse_order_status(&model.status)?,
        order_number: model.order_number,
        user_id: model.user_id,
        full_name: model.full_name,
        email: model.email,
        phone: model.phone,
        address: model.address,
        total_amount: model.total_amount,
        commission_rate: model.commission_rate,
        commission_amount: model.commission_amount,
        payment_id: model.payment_id,
        paid: model.paid,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

pub(crate) fn order_item_from_entity(model: OrderItemModel) -> OrderItem {
    OrderItem {
        id: model.id,
        order_id: model.order_id,
        product_id: model.product_id,
        quantity: model.quantity,
        price: model.price,
        is_send: model.is_send,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

pub(crate) fn ticket_from_entity(model: TicketModel) -> SupportTicket {
    SupportTicket {
        id: model.id,
        user_id: model.user_id,
        name: model.name,
        email: model.email,
        message: model.message,
        status: model.status,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
