use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    dto::ratings::{RatingList, RatingStats, RecalculatedRating},
    entity::{
        ratings::{
            ActiveModel as RatingActive, Column as RatingCol, Entity as Ratings,
            Model as RatingModel,
        },
        restaurants::{Column as RestaurantCol, Entity as Restaurants},
    },
    error::AppResult,
    models::{Order, Rating},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_for_restaurant(
    state: &AppState,
    restaurant_id: Uuid,
) -> AppResult<ApiResponse<RatingList>> {
    let ratings: Vec<Rating> = Ratings::find()
        .filter(RatingCol::RestaurantId.eq(restaurant_id))
        .order_by_desc(RatingCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(rating_from_entity)
        .collect();

    let meta = Meta::count(ratings.len() as i64);
    Ok(ApiResponse::success("Ok", RatingList { ratings }, Some(meta)))
}

pub async fn stats_for_restaurant(
    state: &AppState,
    restaurant_id: Uuid,
) -> AppResult<ApiResponse<RatingStats>> {
    let buckets: Vec<(i32, i64)> = sqlx::query_as(
        "SELECT rating, COUNT(*) FROM ratings WHERE restaurant_id = $1 GROUP BY rating",
    )
    .bind(restaurant_id)
    .fetch_all(&state.pool)
    .await?;

    let mut rating_distribution = [0i64; 5];
    let mut total_ratings = 0i64;
    let mut weighted = 0i64;
    for (stars, count) in buckets {
        if (1..=5).contains(&stars) {
            rating_distribution[(stars - 1) as usize] = count;
        }
        total_ratings += count;
        weighted += i64::from(stars) * count;
    }
    let average_rating = if total_ratings > 0 {
        weighted as f64 / total_ratings as f64
    } else {
        0.0
    };

    Ok(ApiResponse::success(
        "Ok",
        RatingStats {
            average_rating,
            total_ratings,
            rating_distribution,
        },
        Some(Meta::empty()),
    ))
}

/// Append the flat copy of a customer rating; feeds listings and the
/// aggregate queries.
pub async fn record_customer_rating(
    state: &AppState,
    order: &Order,
    rating: i32,
    review: Option<String>,
) -> AppResult<()> {
    RatingActive {
        id: Set(Uuid::new_v4()),
        order_id: Set(order.id),
        restaurant_id: Set(order.restaurant_id),
        customer_id: Set(order.customer_id),
        rating: Set(rating),
        review: Set(review),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(())
}

/// Recompute and store the restaurant's aggregate. A missing restaurant is
/// ignored: ratings may reference ids this service never saw.
pub async fn recalculate_restaurant_rating(
    state: &AppState,
    restaurant_id: Uuid,
) -> AppResult<RecalculatedRating> {
    let (average_rating, total_ratings): (f64, i64) = sqlx::query_as(
        "SELECT COALESCE(AVG(rating), 0)::float8, COUNT(*) FROM ratings WHERE restaurant_id = $1",
    )
    .bind(restaurant_id)
    .fetch_one(&state.pool)
    .await?;

    Restaurants::update_many()
        .col_expr(RestaurantCol::Rating, Expr::value(average_rating))
        .col_expr(RestaurantCol::RatingCount, Expr::value(total_ratings as i32))
        .col_expr(RestaurantCol::UpdatedAt, Expr::value(Utc::now()))
        .filter(RestaurantCol::Id.eq(restaurant_id))
        .exec(&state.orm)
        .await?;

    Ok(RecalculatedRating {
        average_rating,
        total_ratings,
    })
}

fn rating_from_entity(model: RatingModel) -> Rating {
    Rating {
        id: model.id,
        order_id: model.order_id,
        restaurant_id: model.restaurant_id,
        customer_id: model.customer_id,
        rating: model.rating,
        review: model.review,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
