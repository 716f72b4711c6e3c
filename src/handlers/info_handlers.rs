// 服务信息API处理器
// 提供服务横幅、API结构预览和ClickBank路由目录

use actix_web::HttpResponse;
use serde_json::json;

/// 服务横幅
///
/// GET /
///
/// 响应: 服务状态和主要端点目录
pub async fn root_banner() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "WellTech Backend API is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
        "endpoints": {
            "products": "/api/products",
            "articles": "/api/articles",
            "videos": "/api/videos",
            "affiliateEarnings": "/api/affiliate-earnings",
            "analytics": "/api/analytics/dashboard",
            "workflows": "/api/workflows",
            "productCandidates": "/api/product-candidates",
            "clickbank": "/api/workflows/clickbank",
        },
        "preview": "/api/preview",
    }))
}

/// API结构预览
///
/// GET /api/preview
///
/// 响应: 全部API的静态说明，不依赖数据库
pub async fn api_preview() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "API structure preview",
        "note": "This endpoint describes the API surface without requiring a database",
        "endpoints": {
            "products": {
                "GET /api/products": "List all products (query: ?category=...)",
                "GET /api/products/:id": "Get a product by ID",
                "POST /api/products": "Create a product",
                "PUT /api/products/:id": "Update a product",
                "DELETE /api/products/:id": "Delete a product",
                "example": {
                    "create": {
                        "name": "string (required)",
                        "category": "string (required)",
                        "affiliateLink": "string (required)",
                        "description": "string?",
                        "price": "number?",
                        "affiliateProgram": "string?",
                        "commissionPercentage": "number?",
                        "imageUrl": "string?",
                    }
                }
            },
            "articles": {
                "GET /api/articles": "List all articles (query: ?category=...&published=true)",
                "GET /api/articles/:id": "Get an article by ID",
                "GET /api/articles/slug/:slug": "Get an article by slug (increments views)",
                "POST /api/articles": "Create an article",
                "PUT /api/articles/:id": "Update an article",
                "DELETE /api/articles/:id": "Delete an article",
                "example": {
                    "create": {
                        "title": "string (required)",
                        "slug": "string (required, unique)",
                        "category": "string (required)",
                        "content": "string (required)",
                        "seoMetaTitle": "string?",
                        "seoMetaDescription": "string?",
                        "featuredImageUrl": "string?",
                        "productIds": "number[]?",
                        "publishedAt": "Date?",
                    }
                }
            },
            "videos": {
                "GET /api/videos": "List all videos (query: ?articleId=...)",
                "GET /api/videos/:id": "Get a video by ID",
                "POST /api/videos": "Create a video",
                "PUT /api/videos/:id": "Update a video",
                "DELETE /api/videos/:id": "Delete a video",
                "example": {
                    "create": {
                        "title": "string (required)",
                        "script": "string (required)",
                        "articleId": "number?",
                        "videoUrl": "string?",
                        "tiktokUrl": "string?",
                    }
                }
            },
            "affiliateEarnings": {
                "GET /api/affiliate-earnings": "List all earnings (query: ?productId=...)",
                "GET /api/affiliate-earnings/stats": "Aggregated statistics",
                "GET /api/affiliate-earnings/:id": "Get an earning by ID",
                "POST /api/affiliate-earnings": "Create an earning",
                "PUT /api/affiliate-earnings/:id": "Update an earning",
                "DELETE /api/affiliate-earnings/:id": "Delete an earning",
                "example": {
                    "create": {
                        "productId": "number (required)",
                        "clicks": "number?",
                        "conversions": "number?",
                        "revenue": "number?",
                    }
                }
            },
            "workflows": {
                "GET /api/workflows/trends": "List all trends (query: ?limit=...)",
                "GET /api/workflows/trends/category/:category": "List trends by category",
                "POST /api/workflows/trends/analyze": "Analyze and store trends (bulk)",
                "POST /api/workflows/trends": "Create a single trend",
                "example": {
                    "analyze": {
                        "trends": [
                            {
                                "keyword": "string (required)",
                                "source": "string (required) - \"google\", \"reddit\", \"amazon\"",
                                "score": "number (required)",
                                "category": "string?",
                                "metadata": "object?",
                            }
                        ]
                    }
                }
            },
            "clickbank": {
                "GET /api/workflows/clickbank/test": "Test the ClickBank API connection",
                "GET /api/workflows/clickbank/endpoints": "Probe every available endpoint",
                "GET /api/workflows/clickbank/orders": "Get ClickBank orders (query: ?startDate=...&endDate=...&status=...&limit=...)",
                "GET /api/workflows/clickbank/stats": "Get ClickBank statistics (query: ?startDate=...&endDate=...)",
                "note": "Requires CLICKBANK_API_KEY in the environment",
            }
        },
        "database": {
            "status": "not configured",
            "setup": "CRUD collaborators are served by the persistence service, not by this process",
        }
    }))
}

/// ClickBank路由目录
///
/// GET /api/workflows/clickbank
///
/// 响应: ClickBank子路由列表
pub async fn clickbank_directory() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "message": "ClickBank API endpoints are available",
        "status": "ok",
        "endpoints": {
            "test": "/api/workflows/clickbank/test",
            "endpoints": "/api/workflows/clickbank/endpoints",
            "orders": "/api/workflows/clickbank/orders",
            "stats": "/api/workflows/clickbank/stats",
        }
    }))
}
