//! Server-side templates: Prisma, Express, NestJS, FastAPI, Django, Flask.

use serde_json::{Value, json};
use trellis_core::domain::{Database, FeatureTag, Orm, ProjectConfig};

use super::tooling::effective_database;

// ── Prisma ───────────────────────────────────────────────────────────────────

pub(super) fn prisma_schema(c: &ProjectConfig) -> String {
    let db = effective_database(c);
    let provider = match db {
        Database::Postgresql => "postgresql",
        Database::Mysql => "mysql",
        Database::Mongodb => "mongodb",
        Database::Sqlite | Database::None => "sqlite",
    };
    let id = if db == Database::Mongodb {
        "String   @id @default(auto()) @map(\"_id\") @db.ObjectId"
    } else {
        "Int      @id @default(autoincrement())"
    };
    format!(
        "generator client {{
  provider = \"prisma-client-js\"
}}

datasource db {{
  provider = \"{provider}\"
  url      = env(\"DATABASE_URL\")
}}

model User {{
  id        {id}
  email     String   @unique
  name      String?
  createdAt DateTime @default(now())
}}
"
    )
}

/// Single shared client; reused across hot reloads in development.
pub(super) fn prisma_client(c: &ProjectConfig) -> String {
    let global = if c.is_typescript() {
        "const globalForPrisma = globalThis as unknown as { prisma?: PrismaClient };"
    } else {
        "const globalForPrisma = globalThis;"
    };
    format!(
        "import {{ PrismaClient }} from '@prisma/client';

{global}

export const prisma = globalForPrisma.prisma ?? new PrismaClient();

if (process.env.NODE_ENV !== 'production') globalForPrisma.prisma = prisma;
"
    )
}

// ── Express ──────────────────────────────────────────────────────────────────

/// Import lines in the module syntax of the project: ES imports for
/// TypeScript, CommonJS for JavaScript.
struct Imports {
    ts: bool,
    lines: String,
}

impl Imports {
    fn new(c: &ProjectConfig) -> Self {
        Self {
            ts: c.is_typescript(),
            lines: String::new(),
        }
    }

    /// `import name from 'module'` / `const name = require('module')`.
    fn module(&mut self, name: &str, module: &str) -> &mut Self {
        let line = if self.ts {
            format!("import {name} from '{module}';\n")
        } else {
            format!("const {name} = require('{module}');\n")
        };
        self.lines.push_str(&line);
        self
    }

    fn named(&mut self, names: &str, module: &str) -> &mut Self {
        let line = if self.ts {
            format!("import {{ {names} }} from '{module}';\n")
        } else {
            format!("const {{ {names} }} = require('{module}');\n")
        };
        self.lines.push_str(&line);
        self
    }

    fn finish(self) -> String {
        self.lines
    }
}

fn export_default(c: &ProjectConfig, name: &str) -> String {
    if c.is_typescript() {
        format!("export default {name};\n")
    } else {
        format!("module.exports = {name};\n")
    }
}

fn export_named(c: &ProjectConfig, names: &str) -> String {
    if c.is_typescript() {
        format!("export {{ {names} }};\n")
    } else {
        format!("module.exports = {{ {names} }};\n")
    }
}

pub(super) fn express_index(c: &ProjectConfig) -> String {
    let swagger = c.has(FeatureTag::Swagger);
    let mut imports = Imports::new(c);
    if c.is_typescript() {
        imports.lines.push_str("import 'dotenv/config';\n");
    } else {
        imports.lines.push_str("require('dotenv').config();\n");
    }
    imports
        .module("express", "express")
        .module("cors", "cors")
        .module("helmet", "helmet")
        .module("morgan", "morgan")
        .module("routes", "./routes")
        .module("errorHandler", "./middleware/errorHandler");
    if swagger {
        imports
            .module("swaggerUi", "swagger-ui-express")
            .module("swaggerSpec", "./docs/swagger");
    }

    let mut out = imports.finish();
    out.push_str(
        "
const app = express();
const port = Number(process.env.PORT) || 3000;

app.use(helmet());
app.use(cors());
app.use(morgan('dev'));
app.use(express.json());

app.get('/health', (_req, res) => {
  res.json({ status: 'ok' });
});

app.use('/api', routes);
",
    );
    if swagger {
        out.push_str("app.use('/docs', swaggerUi.serve, swaggerUi.setup(swaggerSpec));\n");
    }
    out.push_str(
        "app.use(errorHandler);

if (process.env.NODE_ENV !== 'test') {
  app.listen(port, () => {
    console.log(`{{PROJECT_NAME}} listening on http://localhost:${port}`);
  });
}

",
    );
    out.push_str(&export_default(c, "app"));
    out
}

pub(super) fn express_routes(c: &ProjectConfig) -> String {
    let zod = c.has(FeatureTag::Zod);
    let mut imports = Imports::new(c);
    imports.named("Router", "express");
    if zod {
        imports.named("z", "zod");
    }

    let mut out = imports.finish();
    out.push_str(
        "
const router = Router();

router.get('/', (_req, res) => {
  res.json({ name: '{{PROJECT_NAME}}', version: '{{VERSION}}' });
});
",
    );
    if zod {
        out.push_str(
            "
const echoSchema = z.object({
  message: z.string().min(1),
});

router.post('/echo', (req, res) => {
  const parsed = echoSchema.safeParse(req.body);
  if (!parsed.success) {
    res.status(400).json({ errors: parsed.error.flatten() });
    return;
  }
  res.json(parsed.data);
});
",
        );
    }
    out.push('\n');
    out.push_str(&export_default(c, "router"));
    out
}

pub(super) fn express_error_handler(c: &ProjectConfig) -> String {
    if c.is_typescript() {
        "\
import type { NextFunction, Request, Response } from 'express';

interface HttpError extends Error {
  status?: number;
}

function errorHandler(err: HttpError, _req: Request, res: Response, _next: NextFunction) {
  const status = err.status ?? 500;
  res.status(status).json({
    error: status === 500 ? 'Internal Server Error' : err.message,
  });
}

export default errorHandler;
"
        .to_string()
    } else {
        "\
// eslint-disable-next-line no-unused-vars
function errorHandler(err, _req, res, _next) {
  const status = err.status || 500;
  res.status(status).json({
    error: status === 500 ? 'Internal Server Error' : err.message,
  });
}

module.exports = errorHandler;
"
        .to_string()
    }
}

/// Client module for whichever ORM or driver the project selected.
pub(super) fn express_database(c: &ProjectConfig) -> String {
    let mut imports = Imports::new(c);
    let body: String = match (c.orm(), effective_database(c)) {
        (Orm::Prisma, _) => {
            imports.named("PrismaClient", "@prisma/client");
            format!(
                "\nconst prisma = new PrismaClient();\n\n{}",
                export_default(c, "prisma")
            )
        }
        (Orm::Mongoose, _) | (Orm::None, Database::Mongodb) => {
            imports.module("mongoose", "mongoose");
            format!(
                "
async function connect() {{
  await mongoose.connect(process.env.DATABASE_URL ?? '');
}}

{}",
                export_named(c, "connect, mongoose")
            )
        }
        (Orm::TypeOrm, db) => {
            if c.is_typescript() {
                imports.lines.push_str("import 'reflect-metadata';\n");
            } else {
                imports.lines.push_str("require('reflect-metadata');\n");
            }
            imports.named("DataSource", "typeorm");
            let (kind, url) = match db {
                Database::Postgresql => ("postgres", "url: process.env.DATABASE_URL"),
                Database::Mysql => ("mysql", "url: process.env.DATABASE_URL"),
                _ => ("better-sqlite3", "database: 'dev.db'"),
            };
            format!(
                "
const dataSource = new DataSource({{
  type: '{kind}',
  {url},
  synchronize: process.env.NODE_ENV !== 'production',
  entities: [],
}});

{}",
                export_default(c, "dataSource")
            )
        }
        (Orm::Sequelize, db) => {
            imports.named("Sequelize", "sequelize");
            let init = match db {
                Database::Postgresql | Database::Mysql => {
                    "new Sequelize(process.env.DATABASE_URL ?? '', { logging: false })"
                }
                _ => "new Sequelize({ dialect: 'sqlite', storage: 'dev.db', logging: false })",
            };
            format!(
                "\nconst sequelize = {init};\n\n{}",
                export_default(c, "sequelize")
            )
        }
        (Orm::Drizzle, Database::Postgresql) => {
            imports
                .named("drizzle", "drizzle-orm/node-postgres")
                .named("Pool", "pg");
            format!(
                "\nconst pool = new Pool({{ connectionString: process.env.DATABASE_URL }});\nconst db = drizzle(pool);\n\n{}",
                export_default(c, "db")
            )
        }
        (Orm::Drizzle, Database::Mysql) => {
            imports
                .named("drizzle", "drizzle-orm/mysql2")
                .module("mysql", "mysql2/promise");
            format!(
                "\nconst pool = mysql.createPool(process.env.DATABASE_URL ?? '');\nconst db = drizzle(pool);\n\n{}",
                export_default(c, "db")
            )
        }
        (Orm::Drizzle, _) => {
            imports
                .named("drizzle", "drizzle-orm/better-sqlite3")
                .module("Database", "better-sqlite3");
            format!(
                "\nconst sqlite = new Database('dev.db');\nconst db = drizzle(sqlite);\n\n{}",
                export_default(c, "db")
            )
        }
        (_, Database::Postgresql) => {
            imports.named("Pool", "pg");
            format!(
                "\nconst pool = new Pool({{ connectionString: process.env.DATABASE_URL }});\n\n{}",
                export_default(c, "pool")
            )
        }
        (_, Database::Mysql) => {
            imports.module("mysql", "mysql2/promise");
            format!(
                "\nconst pool = mysql.createPool(process.env.DATABASE_URL ?? '');\n\n{}",
                export_default(c, "pool")
            )
        }
        _ => {
            imports.module("Database", "better-sqlite3");
            format!(
                "\nconst db = new Database('dev.db');\n\n{}",
                export_default(c, "db")
            )
        }
    };
    let mut out = imports.finish();
    out.push_str(&body);
    out
}

pub(super) fn express_swagger(c: &ProjectConfig) -> String {
    let mut imports = Imports::new(c);
    imports.module("swaggerJsdoc", "swagger-jsdoc");
    let mut out = imports.finish();
    out.push_str(
        "
const swaggerSpec = swaggerJsdoc({
  definition: {
    openapi: '3.0.0',
    info: {
      title: '{{PROJECT_NAME}}',
      version: '{{VERSION}}',
      description: '{{DESCRIPTION_OR_NAME}}',
    },
  },
  apis: ['./src/routes/*.{{SCRIPT_EXT}}'],
});

",
    );
    out.push_str(&export_default(c, "swaggerSpec"));
    out
}

pub(super) fn express_app_test(c: &ProjectConfig) -> String {
    let mut imports = Imports::new(c);
    imports
        .named("describe, expect, it", "vitest")
        .module("request", "supertest")
        .module("app", "../src/index");
    let mut out = imports.finish();
    out.push_str(
        "
describe('GET /health', () => {
  it('reports ok', async () => {
    const res = await request(app).get('/health');
    expect(res.status).toBe(200);
    expect(res.body).toEqual({ status: 'ok' });
  });
});
",
    );
    out
}

// ── NestJS ───────────────────────────────────────────────────────────────────

pub(super) fn nest_cli_json() -> Value {
    json!({
        "$schema": "https://json.schemastore.org/nest-cli",
        "collection": "@nestjs/schematics",
        "sourceRoot": "src",
        "compilerOptions": { "deleteOutDir": true }
    })
}

pub(super) fn tsconfig_build() -> Value {
    json!({
        "extends": "./tsconfig.json",
        "exclude": ["node_modules", "test", "dist", "**/*spec.ts"]
    })
}

pub(super) fn nest_main(c: &ProjectConfig) -> String {
    let swagger = c.has(FeatureTag::Swagger);
    let mut out = String::from("import { NestFactory } from '@nestjs/core';\n");
    if swagger {
        out.push_str("import { DocumentBuilder, SwaggerModule } from '@nestjs/swagger';\n");
    }
    out.push_str("import { AppModule } from './app.module';\n\nasync function bootstrap() {\n  const app = await NestFactory.create(AppModule);\n");
    if swagger {
        out.push_str(
            "
  const config = new DocumentBuilder()
    .setTitle('{{PROJECT_NAME}}')
    .setDescription('{{DESCRIPTION_OR_NAME}}')
    .setVersion('{{VERSION}}')
    .build();
  SwaggerModule.setup('docs', app, SwaggerModule.createDocument(app, config));
",
        );
    }
    out.push_str("\n  await app.listen(process.env.PORT ?? 3000);\n}\n\nbootstrap();\n");
    out
}

pub(super) const NEST_APP_MODULE: &str = "\
import { Module } from '@nestjs/common';
import { AppController } from './app.controller';
import { AppService } from './app.service';

@Module({
  imports: [],
  controllers: [AppController],
  providers: [AppService],
})
export class AppModule {}
";

pub(super) const NEST_APP_CONTROLLER: &str = "\
import { Controller, Get } from '@nestjs/common';
import { AppService } from './app.service';

@Controller()
export class AppController {
  constructor(private readonly appService: AppService) {}

  @Get()
  getHello(): string {
    return this.appService.getHello();
  }
}
";

pub(super) const NEST_APP_SERVICE: &str = "\
import { Injectable } from '@nestjs/common';

@Injectable()
export class AppService {
  getHello(): string {
    return 'Hello from {{PROJECT_NAME}}!';
  }
}
";

pub(super) const NEST_CONTROLLER_SPEC: &str = "\
import { Test, TestingModule } from '@nestjs/testing';
import { AppController } from './app.controller';
import { AppService } from './app.service';

describe('AppController', () => {
  let appController: AppController;

  beforeEach(async () => {
    const app: TestingModule = await Test.createTestingModule({
      controllers: [AppController],
      providers: [AppService],
    }).compile();

    appController = app.get<AppController>(AppController);
  });

  it('returns the greeting', () => {
    expect(appController.getHello()).toBe('Hello from {{PROJECT_NAME}}!');
  });
});
";

// ── FastAPI ──────────────────────────────────────────────────────────────────

fn relational(c: &ProjectConfig) -> bool {
    matches!(c.orm(), Orm::SqlAlchemy | Orm::SqlModel)
}

/// Mount path of the API router.
fn fastapi_prefix(c: &ProjectConfig) -> &'static str {
    if c.has(FeatureTag::LargeScale) {
        "/api/v1"
    } else {
        "/api"
    }
}

pub(super) fn fastapi_main(c: &ProjectConfig) -> String {
    let large = c.has(FeatureTag::LargeScale);
    let tortoise = c.orm() == Orm::Tortoise;

    let mut out = String::from("from fastapi import FastAPI\nfrom fastapi.middleware.cors import CORSMiddleware\n");
    if tortoise {
        out.push_str("from tortoise.contrib.fastapi import register_tortoise\n");
    }
    out.push('\n');
    if large {
        out.push_str("from app.api.v1.endpoints import health\n");
    } else {
        out.push_str("from app.api.routes import router\n");
    }
    out.push_str("from app.core.config import settings\n\n");
    out.push_str(
        "app = FastAPI(\n    title=settings.project_name,\n    description=\"{{DESCRIPTION_OR_NAME}}\",\n    version=\"{{VERSION}}\",\n)\n\n",
    );
    out.push_str(
        "app.add_middleware(\n    CORSMiddleware,\n    allow_origins=settings.cors_origins,\n    allow_credentials=True,\n    allow_methods=[\"*\"],\n    allow_headers=[\"*\"],\n)\n\n",
    );
    if large {
        out.push_str(&format!(
            "app.include_router(health.router, prefix=\"{}\", tags=[\"health\"])\n",
            fastapi_prefix(c)
        ));
    } else {
        out.push_str(&format!(
            "app.include_router(router, prefix=\"{}\")\n",
            fastapi_prefix(c)
        ));
    }
    if tortoise {
        out.push_str(
            "\nregister_tortoise(\n    app,\n    db_url=settings.database_url,\n    modules={\"models\": []},\n    generate_schemas=True,\n)\n",
        );
    }
    out.push_str("\n\n@app.get(\"/\")\nasync def root() -> dict[str, str]:\n    return {\"name\": settings.project_name}\n");
    out
}

pub(super) fn fastapi_settings(c: &ProjectConfig) -> String {
    let mut out = String::from(
        "from pydantic_settings import BaseSettings, SettingsConfigDict\n\n\nclass Settings(BaseSettings):\n    model_config = SettingsConfigDict(env_file=\".env\", extra=\"ignore\")\n\n    project_name: str = \"{{PROJECT_NAME}}\"\n    debug: bool = False\n    secret_key: str = \"change-me\"\n    cors_origins: list[str] = [\"http://localhost:3000\"]\n",
    );
    if let Some(url) = super::tooling::python_database_url(c) {
        out.push_str(&format!("    database_url: str = \"{url}\"\n"));
    }
    if c.has(FeatureTag::Jwt) {
        out.push_str("    jwt_algorithm: str = \"HS256\"\n    access_token_expire_minutes: int = 30\n");
    }
    if c.has(FeatureTag::Celery) {
        out.push_str("    redis_url: str = \"redis://localhost:6379/0\"\n");
    }
    out.push_str("\n\nsettings = Settings()\n");
    out
}

pub(super) const FASTAPI_ROUTER: &str = "\
from fastapi import APIRouter

router = APIRouter()


@router.get(\"/health\")
async def health() -> dict[str, str]:
    return {\"status\": \"ok\"}
";

pub(super) const FASTAPI_SESSION: &str = "\
from collections.abc import AsyncIterator

from sqlalchemy.ext.asyncio import AsyncSession, async_sessionmaker, create_async_engine

from app.core.config import settings

engine = create_async_engine(settings.database_url, echo=settings.debug)
SessionLocal = async_sessionmaker(engine, expire_on_commit=False)


async def get_session() -> AsyncIterator[AsyncSession]:
    async with SessionLocal() as session:
        yield session
";

pub(super) fn fastapi_base(c: &ProjectConfig) -> String {
    if c.orm() == Orm::SqlModel {
        "from sqlmodel import SQLModel\n\nBase = SQLModel\nmetadata = SQLModel.metadata\n".to_string()
    } else {
        "from sqlalchemy.orm import DeclarativeBase\n\n\nclass Base(DeclarativeBase):\n    pass\n\n\nmetadata = Base.metadata\n"
            .to_string()
    }
}

pub(super) const FASTAPI_SECURITY: &str = "\
from datetime import datetime, timedelta, timezone
from typing import Any

from jose import jwt
from passlib.context import CryptContext

from app.core.config import settings

pwd_context = CryptContext(schemes=[\"bcrypt\"], deprecated=\"auto\")


def hash_password(password: str) -> str:
    return pwd_context.hash(password)


def verify_password(plain: str, hashed: str) -> bool:
    return pwd_context.verify(plain, hashed)


def create_access_token(subject: str, extra: dict[str, Any] | None = None) -> str:
    expire = datetime.now(timezone.utc) + timedelta(minutes=settings.access_token_expire_minutes)
    payload = {\"sub\": subject, \"exp\": expire, **(extra or {})}
    return jwt.encode(payload, settings.secret_key, algorithm=settings.jwt_algorithm)


def decode_token(token: str) -> dict[str, Any]:
    return jwt.decode(token, settings.secret_key, algorithms=[settings.jwt_algorithm])
";

pub(super) const CELERY_WORKER: &str = "\
from celery import Celery

from app.core.config import settings

celery_app = Celery(\"{{MODULE_NAME}}\", broker=settings.redis_url, backend=settings.redis_url)


@celery_app.task
def ping() -> str:
    return \"pong\"
";

pub(super) const ALEMBIC_INI: &str = "\
[alembic]
script_location = alembic
prepend_sys_path = .

[loggers]
keys = root,sqlalchemy,alembic

[handlers]
keys = console

[formatters]
keys = generic

[logger_root]
level = WARN
handlers = console

[logger_sqlalchemy]
level = WARN
handlers =
qualname = sqlalchemy.engine

[logger_alembic]
level = INFO
handlers =
qualname = alembic

[handler_console]
class = StreamHandler
args = (sys.stderr,)
level = NOTSET
formatter = generic

[formatter_generic]
format = %(levelname)-5.5s [%(name)s] %(message)s
";

pub(super) const ALEMBIC_ENV: &str = "\
import asyncio
from logging.config import fileConfig

from alembic import context
from sqlalchemy.ext.asyncio import create_async_engine

from app.core.config import settings
from app.db.base import metadata

config = context.config
if config.config_file_name is not None:
    fileConfig(config.config_file_name)

target_metadata = metadata


def run_migrations_offline() -> None:
    context.configure(url=settings.database_url, target_metadata=target_metadata, literal_binds=True)
    with context.begin_transaction():
        context.run_migrations()


def do_run_migrations(connection) -> None:  # type: ignore[no-untyped-def]
    context.configure(connection=connection, target_metadata=target_metadata)
    with context.begin_transaction():
        context.run_migrations()


async def run_migrations_online() -> None:
    engine = create_async_engine(settings.database_url)
    async with engine.connect() as connection:
        await connection.run_sync(do_run_migrations)
    await engine.dispose()


if context.is_offline_mode():
    run_migrations_offline()
else:
    asyncio.run(run_migrations_online())
";

pub(super) fn fastapi_test(c: &ProjectConfig) -> String {
    format!(
        "from fastapi.testclient import TestClient

from app.main import app

client = TestClient(app)


def test_root() -> None:
    response = client.get(\"/\")
    assert response.status_code == 200


def test_health() -> None:
    response = client.get(\"{}/health\")
    assert response.status_code == 200
    assert response.json() == {{\"status\": \"ok\"}}
",
        fastapi_prefix(c)
    )
}

// ── Django ───────────────────────────────────────────────────────────────────

pub(super) const DJANGO_MANAGE: &str = "\
#!/usr/bin/env python
import os
import sys


def main() -> None:
    os.environ.setdefault(\"DJANGO_SETTINGS_MODULE\", \"{{MODULE_NAME}}.settings\")
    from django.core.management import execute_from_command_line

    execute_from_command_line(sys.argv)


if __name__ == \"__main__\":
    main()
";

pub(super) fn django_settings(c: &ProjectConfig) -> String {
    let mut apps = vec![
        "django.contrib.admin",
        "django.contrib.auth",
        "django.contrib.contenttypes",
        "django.contrib.sessions",
        "django.contrib.messages",
        "django.contrib.staticfiles",
    ];
    if c.has(FeatureTag::Drf) {
        apps.push("rest_framework");
    }
    if c.has(FeatureTag::Celery) {
        apps.push("django_celery_beat");
    }
    let installed: String = apps.iter().map(|a| format!("    \"{a}\",\n")).collect();
    let default_db = super::tooling::python_database_url(c).unwrap_or("sqlite:///db.sqlite3");

    let mut out = format!(
        "from pathlib import Path

import environ

BASE_DIR = Path(__file__).resolve().parent.parent

env = environ.Env(DEBUG=(bool, False))
environ.Env.read_env(BASE_DIR / \".env\")

SECRET_KEY = env(\"SECRET_KEY\", default=\"change-me\")
DEBUG = env(\"DEBUG\")
ALLOWED_HOSTS = env.list(\"ALLOWED_HOSTS\", default=[\"localhost\", \"127.0.0.1\"])

INSTALLED_APPS = [
{installed}]

MIDDLEWARE = [
    \"django.middleware.security.SecurityMiddleware\",
    \"django.contrib.sessions.middleware.SessionMiddleware\",
    \"django.middleware.common.CommonMiddleware\",
    \"django.middleware.csrf.CsrfViewMiddleware\",
    \"django.contrib.auth.middleware.AuthenticationMiddleware\",
    \"django.contrib.messages.middleware.MessageMiddleware\",
    \"django.middleware.clickjacking.XFrameOptionsMiddleware\",
]

ROOT_URLCONF = \"{{{{MODULE_NAME}}}}.urls\"

TEMPLATES = [
    {{
        \"BACKEND\": \"django.template.backends.django.DjangoTemplates\",
        \"DIRS\": [BASE_DIR / \"templates\"],
        \"APP_DIRS\": True,
        \"OPTIONS\": {{
            \"context_processors\": [
                \"django.template.context_processors.request\",
                \"django.contrib.auth.context_processors.auth\",
                \"django.contrib.messages.context_processors.messages\",
            ],
        }},
    }},
]

WSGI_APPLICATION = \"{{{{MODULE_NAME}}}}.wsgi.application\"

DATABASES = {{
    \"default\": env.db(\"DATABASE_URL\", default=\"{default_db}\"),
}}

LANGUAGE_CODE = \"en-us\"
TIME_ZONE = \"UTC\"
USE_I18N = True
USE_TZ = True

STATIC_URL = \"static/\"
STATICFILES_DIRS = [BASE_DIR / \"static\"]
DEFAULT_AUTO_FIELD = \"django.db.models.BigAutoField\"
"
    );
    if c.has(FeatureTag::Drf) {
        out.push_str(
            "
REST_FRAMEWORK = {
    \"DEFAULT_PERMISSION_CLASSES\": [\"rest_framework.permissions.AllowAny\"],
}
",
        );
    }
    if c.has(FeatureTag::Celery) {
        out.push_str(
            "
CELERY_BROKER_URL = env(\"REDIS_URL\", default=\"redis://localhost:6379/0\")
CELERY_RESULT_BACKEND = CELERY_BROKER_URL
CELERY_BEAT_SCHEDULER = \"django_celery_beat.schedulers:DatabaseScheduler\"
",
        );
    }
    out
}

pub(super) fn django_urls(c: &ProjectConfig) -> String {
    let mut out = String::from("from django.contrib import admin\nfrom django.http import JsonResponse\nfrom django.urls import path\n");
    if c.has(FeatureTag::Drf) {
        out.push_str("from rest_framework.decorators import api_view\nfrom rest_framework.response import Response\n");
    }
    out.push_str("\n\ndef health(request):  # type: ignore[no-untyped-def]\n    return JsonResponse({\"status\": \"ok\"})\n");
    if c.has(FeatureTag::Drf) {
        out.push_str(
            "\n\n@api_view([\"GET\"])\ndef api_root(request):  # type: ignore[no-untyped-def]\n    return Response({\"name\": \"{{PROJECT_NAME}}\"})\n",
        );
    }
    out.push_str("\n\nurlpatterns = [\n    path(\"admin/\", admin.site.urls),\n    path(\"health/\", health),\n");
    if c.has(FeatureTag::Drf) {
        out.push_str("    path(\"api/\", api_root),\n");
    }
    out.push_str("]\n");
    out
}

pub(super) const DJANGO_WSGI: &str = "\
import os

from django.core.wsgi import get_wsgi_application

os.environ.setdefault(\"DJANGO_SETTINGS_MODULE\", \"{{MODULE_NAME}}.settings\")

application = get_wsgi_application()
";

pub(super) const DJANGO_ASGI: &str = "\
import os

from django.core.asgi import get_asgi_application

os.environ.setdefault(\"DJANGO_SETTINGS_MODULE\", \"{{MODULE_NAME}}.settings\")

application = get_asgi_application()
";

pub(super) const DJANGO_CELERY: &str = "\
import os

from celery import Celery

os.environ.setdefault(\"DJANGO_SETTINGS_MODULE\", \"{{MODULE_NAME}}.settings\")

app = Celery(\"{{MODULE_NAME}}\")
app.config_from_object(\"django.conf:settings\", namespace=\"CELERY\")
app.autodiscover_tasks()
";

pub(super) const DJANGO_PYTEST_INI: &str = "\
[pytest]
DJANGO_SETTINGS_MODULE = {{MODULE_NAME}}.settings
python_files = tests.py test_*.py *_tests.py
";

pub(super) const DJANGO_TEST: &str = "\
from django.test import Client


def test_health(client: Client) -> None:
    response = client.get(\"/health/\")
    assert response.status_code == 200
    assert response.json() == {\"status\": \"ok\"}
";

// ── Flask ────────────────────────────────────────────────────────────────────

pub(super) fn flask_factory(c: &ProjectConfig) -> String {
    let sqlalchemy = c.orm() == Orm::SqlAlchemy;
    let jwt = c.has(FeatureTag::Jwt);
    let celery = c.has(FeatureTag::Celery);

    let mut out = String::from("from flask import Flask\n");
    if jwt {
        out.push_str("from flask_jwt_extended import JWTManager\n");
    }
    if sqlalchemy {
        out.push_str("from flask_migrate import Migrate\nfrom flask_sqlalchemy import SQLAlchemy\n");
    }
    if celery {
        out.push_str("from celery import Celery, Task\n");
    }
    out.push_str("\nfrom config import Config\n\n");

    if sqlalchemy {
        out.push_str("db = SQLAlchemy()\nmigrate = Migrate()\n");
    }
    if jwt {
        out.push_str("jwt = JWTManager()\n");
    }
    if sqlalchemy || jwt {
        out.push('\n');
    }

    if celery {
        out.push_str(
            "
def celery_init_app(app: Flask) -> Celery:
    class FlaskTask(Task):
        def __call__(self, *args: object, **kwargs: object) -> object:
            with app.app_context():
                return self.run(*args, **kwargs)

    celery_app = Celery(app.name, task_cls=FlaskTask)
    celery_app.config_from_object(app.config[\"CELERY\"])
    celery_app.set_default()
    app.extensions[\"celery\"] = celery_app
    return celery_app

",
        );
    }

    out.push_str("\ndef create_app(config_class: type[Config] = Config) -> Flask:\n    app = Flask(__name__)\n    app.config.from_object(config_class)\n\n");
    if sqlalchemy {
        out.push_str("    db.init_app(app)\n    migrate.init_app(app, db)\n");
    }
    if jwt {
        out.push_str("    jwt.init_app(app)\n");
    }
    if celery {
        out.push_str("    celery_init_app(app)\n");
    }
    out.push_str("\n    from app.routes import bp\n\n    app.register_blueprint(bp)\n    return app\n");
    out
}

pub(super) const FLASK_ROUTES: &str = "\
from flask import Blueprint, jsonify

bp = Blueprint(\"main\", __name__)


@bp.get(\"/\")
def index():  # type: ignore[no-untyped-def]
    return jsonify(name=\"{{PROJECT_NAME}}\", version=\"{{VERSION}}\")


@bp.get(\"/health\")
def health():  # type: ignore[no-untyped-def]
    return jsonify(status=\"ok\")
";

pub(super) fn flask_config(c: &ProjectConfig) -> String {
    let mut out = String::from(
        "import os\n\nfrom dotenv import load_dotenv\n\nload_dotenv()\n\n\nclass Config:\n    SECRET_KEY = os.environ.get(\"SECRET_KEY\", \"change-me\")\n",
    );
    if c.orm() == Orm::SqlAlchemy {
        let url = super::tooling::python_database_url(c).unwrap_or("sqlite:///app.db");
        out.push_str(&format!(
            "    SQLALCHEMY_DATABASE_URI = os.environ.get(\"DATABASE_URL\", \"{url}\")\n    SQLALCHEMY_TRACK_MODIFICATIONS = False\n"
        ));
    }
    if c.has(FeatureTag::Jwt) {
        out.push_str("    JWT_SECRET_KEY = os.environ.get(\"JWT_SECRET_KEY\", \"change-me\")\n");
    }
    if c.has(FeatureTag::Celery) {
        out.push_str(
            "    CELERY = {\n        \"broker_url\": os.environ.get(\"REDIS_URL\", \"redis://localhost:6379/0\"),\n        \"result_backend\": os.environ.get(\"REDIS_URL\", \"redis://localhost:6379/0\"),\n    }\n",
        );
    }
    out.push_str("\n\nclass TestConfig(Config):\n    TESTING = True\n");
    if c.orm() == Orm::SqlAlchemy {
        out.push_str("    SQLALCHEMY_DATABASE_URI = \"sqlite://\"\n");
    }
    out
}

pub(super) const FLASK_WSGI: &str = "\
from app import create_app

app = create_app()

if __name__ == \"__main__\":
    app.run()
";

pub(super) const FLASK_TEST: &str = "\
import pytest

from app import create_app
from config import TestConfig


@pytest.fixture()
def client():  # type: ignore[no-untyped-def]
    app = create_app(TestConfig)
    return app.test_client()


def test_health(client) -> None:  # type: ignore[no-untyped-def]
    response = client.get(\"/health\")
    assert response.status_code == 200
    assert response.get_json() == {\"status\": \"ok\"}
";

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::domain::RawProjectConfig;

    fn config(ty: &str, edit: impl FnOnce(&mut RawProjectConfig)) -> ProjectConfig {
        let mut raw = RawProjectConfig::new(ty, "api");
        edit(&mut raw);
        raw.normalize().unwrap()
    }

    #[test]
    fn express_javascript_uses_commonjs() {
        let c = config("express", |r| r.language = Some("javascript".into()));
        let index = express_index(&c);
        assert!(index.starts_with("require('dotenv').config();\nconst express = require('express');"));
        assert!(index.ends_with("module.exports = app;\n"));
    }

    #[test]
    fn express_typescript_uses_imports() {
        let c = config("express", |r| {
            r.language = Some("typescript".into());
            r.features = Some("swagger".into());
        });
        let index = express_index(&c);
        assert!(index.contains("import swaggerUi from 'swagger-ui-express';"));
        assert!(index.contains("app.use('/docs'"));
        assert!(index.ends_with("export default app;\n"));
    }

    #[test]
    fn database_module_follows_orm() {
        let c = config("express", |r| {
            r.orm = Some("drizzle".into());
            r.database = Some("postgresql".into());
        });
        assert!(express_database(&c).contains("drizzle-orm/node-postgres"));

        let c = config("express", |r| r.database = Some("mysql".into()));
        assert!(express_database(&c).contains("mysql2/promise"));
    }

    #[test]
    fn prisma_mongodb_uses_object_ids() {
        let c = config("nextjs", |r| {
            r.orm = Some("prisma".into());
            r.database = Some("mongodb".into());
        });
        let schema = prisma_schema(&c);
        assert!(schema.contains("provider = \"mongodb\""));
        assert!(schema.contains("@db.ObjectId"));
    }

    #[test]
    fn fastapi_large_scale_mounts_versioned_router() {
        let c = config("fastapi", |r| r.features = Some("large-scale".into()));
        assert!(fastapi_main(&c).contains("prefix=\"/api/v1\""));
        assert!(fastapi_test(&c).contains("client.get(\"/api/v1/health\")"));
    }

    #[test]
    fn fastapi_settings_carry_database_url() {
        let c = config("fastapi", |r| {
            r.orm = Some("sqlmodel".into());
            r.database = Some("sqlite".into());
        });
        assert!(fastapi_settings(&c).contains("database_url: str = \"sqlite+aiosqlite:///./app.db\""));
    }

    #[test]
    fn django_settings_register_optional_apps() {
        let c = config("django", |r| r.features = Some("drf,celery".into()));
        let settings = django_settings(&c);
        assert!(settings.contains("    \"rest_framework\",\n    \"django_celery_beat\",\n]"));
        assert!(settings.contains("CELERY_BROKER_URL"));
        assert!(settings.contains("ROOT_URLCONF = \"{{MODULE_NAME}}.urls\""));
    }

    #[test]
    fn flask_factory_wires_extensions() {
        let c = config("flask", |r| {
            r.orm = Some("sqlalchemy".into());
            r.features = Some("jwt".into());
        });
        let factory = flask_factory(&c);
        assert!(factory.contains("    db.init_app(app)\n    migrate.init_app(app, db)\n    jwt.init_app(app)\n"));
    }
}
