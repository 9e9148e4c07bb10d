use anyhow::{Context, Result};
use colored::*;
use reqwest::{Client, Method};
use serde_json::{json, Value};
use std::io::{self, Write};

struct Session {
    client: Client,
    base_url: String,
    token: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🔧 FixItFast Testing Tool".bright_blue().bold());
    println!("{}", "=========================".bright_blue());
    println!();

    // Paso 1: servidor y token de acceso
    let base_url = prompt("URL del servidor [http://localhost:3000]: ")?;
    let base_url = if base_url.is_empty() {
        "http://localhost:3000".to_string()
    } else {
        base_url.trim_end_matches('/').to_string()
    };
    let token = prompt("Access token (Bearer): ")?;

    let session = Session {
        client: Client::new(),
        base_url,
        token,
    };

    // Paso 2: comprobar que el servidor responde
    session.call(Method::GET, "/health", None).await?;

    // Paso 3: Menú principal
    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 👤 Ver mi perfil");
        println!("2. 📊 Montar dashboard (ubicación opcional)");
        println!("3. 🗺️ Enviar token de Mapbox");
        println!("4. 📍 Refrescar mecánicos en el mapa");
        println!("5. 🆘 Enviar solicitud de servicio");
        println!("6. 📜 Ver mis solicitudes");
        println!("7. 🚪 Desmontar dashboard y salir");
        let choice = prompt("Selecciona una opción (1-7): ")?;

        match choice.as_str() {
            "1" => session.call(Method::GET, "/api/profile/me", None).await?,
            "2" => {
                let lat = prompt("Latitud (vacío = geolocalización denegada): ")?;
                let body = match lat.parse::<f64>() {
                    Ok(lat) => {
                        let lng: f64 = prompt("Longitud: ")?.parse().context("Longitud inválida")?;
                        json!({ "location": { "status": "position", "lat": lat, "lng": lng } })
                    }
                    Err(_) => json!({ "location": { "status": "failed", "error": "permission_denied" } }),
                };
                session.call(Method::POST, "/api/dashboard/session", Some(body)).await?;
            }
            "3" => {
                let token = prompt("Token público de Mapbox: ")?;
                session
                    .call(Method::POST, "/api/dashboard/map/token", Some(json!({ "token": token })))
                    .await?;
            }
            "4" => session.call(Method::POST, "/api/dashboard/mechanics/refresh", None).await?,
            "5" => {
                let title = prompt("Título: ")?;
                let description = prompt("Descripción: ")?;
                let address = prompt("Dirección (vacío = geocodificar ubicación): ")?;
                let body = json!({ "title": title, "description": description, "address": address });
                session.call(Method::POST, "/api/service-requests", Some(body)).await?;
            }
            "6" => session.call(Method::GET, "/api/service-requests", None).await?,
            "7" => {
                session.call(Method::DELETE, "/api/dashboard/session", None).await?;
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red()),
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

impl Session {
    async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        println!();
        println!("{} {} {}", "📤".bright_blue(), method, url);

        let mut request = self.client.request(method, &url).bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.context("No se pudo contactar el servidor")?;
        let status = response.status();
        let text = response.text().await?;

        let pretty = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|json| serde_json::to_string_pretty(&json).ok())
            .unwrap_or(text);

        if status.is_success() {
            println!("{} {}", "✅".bright_green(), status.to_string().bright_green());
        } else {
            println!("{} {}", "❌".bright_red(), status.to_string().bright_red());
        }
        println!("{}", pretty);
        Ok(())
    }
}
