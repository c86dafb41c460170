//! Fixed TypeScript text shared by every generated client.

/// Result, error and interceptor declarations plus the transport helpers.
pub(crate) const PRELUDE: &str = r#"export type ApiResult<T, E extends number = number> =
  | { ok: true; status: number; data: T }
  | { ok: false; error: ApiError<E> };

export interface ApiError<E extends number = number> {
  /** HTTP status of the failed response, or 0 when no response arrived. */
  status: E | 0;
  message: string;
  /** Decoded error body, when the server sent one. */
  payload?: unknown;
}

export interface RequestContext {
  method: string;
  url: string;
  headers: Record<string, string>;
  body?: string;
}

export type RequestInterceptor = (context: RequestContext) => RequestContext | Promise<RequestContext>;

export type ResponseInterceptor = (response: Response, context: RequestContext) => Response | Promise<Response>;

export interface ClientOptions {
  baseUrl?: string;
  apiKey?: string;
  bearerToken?: string;
  /** Retries after the first attempt. Defaults to 3. */
  retries?: number;
  /** Base backoff delay; retry `n` waits `retryDelayMs * 2^n`. Defaults to 500. */
  retryDelayMs?: number;
  fetch?: typeof fetch;
}

function buildQuery(params: Record<string, unknown>): string {
  const search = new URLSearchParams();
  for (const [key, value] of Object.entries(params)) {
    const values = Array.isArray(value) ? value : [value];
    for (const item of values) {
      if (item === undefined || item === null) continue;
      search.append(key, typeof item === "object" ? JSON.stringify(item) : String(item));
    }
  }
  const query = search.toString();
  return query ? `?${query}` : "";
}

function buildHeaders(params: Record<string, unknown>): Record<string, string> {
  const headers: Record<string, string> = {};
  for (const [key, value] of Object.entries(params)) {
    if (value === undefined || value === null) continue;
    headers[key] = Array.isArray(value) ? value.map(String).join(",") : String(value);
  }
  return headers;
}

function isRetryable(status: number): boolean {
  return status === 408 || status === 429 || status >= 500;
}

function sleep(ms: number): Promise<void> {
  return new Promise((resolve) => setTimeout(resolve, ms));
}

async function readPayload(response: Response): Promise<unknown> {
  if (response.status === 204) return undefined;
  const text = await response.text();
  if (!text) return undefined;
  try {
    return JSON.parse(text);
  } catch {
    return text;
  }
}
"#;

/// Members shared by every client class: configuration, interceptors and the transport.
pub(crate) const CLIENT_CORE: &str = r#"  readonly #baseUrl: string;
  readonly #apiKey: string | undefined;
  readonly #bearerToken: string | undefined;
  readonly #retries: number;
  readonly #retryDelayMs: number;
  readonly #fetchImpl: typeof fetch;
  readonly #requestInterceptors: RequestInterceptor[] = [];
  readonly #responseInterceptors: ResponseInterceptor[] = [];

  constructor(options: ClientOptions = {}) {
    this.#baseUrl = (options.baseUrl ?? DEFAULT_BASE_URL).replace(/\/+$/, "");
    this.#apiKey = options.apiKey;
    this.#bearerToken = options.bearerToken;
    this.#retries = Math.max(0, options.retries ?? 3);
    this.#retryDelayMs = options.retryDelayMs ?? 500;
    this.#fetchImpl = options.fetch ?? globalThis.fetch.bind(globalThis);
  }

  /** Registers a hook applied to every outgoing request, in registration order. */
  useRequestInterceptor(interceptor: RequestInterceptor): this {
    this.#requestInterceptors.push(interceptor);
    return this;
  }

  /** Registers a hook applied to every received response, in registration order. */
  useResponseInterceptor(interceptor: ResponseInterceptor): this {
    this.#responseInterceptors.push(interceptor);
    return this;
  }

  async #request<T, E extends number = number>(
    method: string,
    path: string,
    headers: Record<string, string> = {},
    body?: unknown,
  ): Promise<ApiResult<T, E>> {
    let context: RequestContext = {
      method,
      url: `${this.#baseUrl}${path}`,
      headers: { Accept: "application/json", ...headers },
    };
    if (body !== undefined) {
      context.headers["Content-Type"] = "application/json";
      context.body = JSON.stringify(body);
    }
    if (this.#apiKey) context.headers["X-API-Key"] = this.#apiKey;
    if (this.#bearerToken) context.headers["Authorization"] = `Bearer ${this.#bearerToken}`;
    for (const interceptor of this.#requestInterceptors) {
      context = await interceptor(context);
    }

    for (let attempt = 0; ; attempt++) {
      let response: Response;
      try {
        response = await this.#fetchImpl(context.url, {
          method: context.method,
          headers: context.headers,
          body: context.body,
        });
      } catch (error) {
        if (attempt < this.#retries) {
          await sleep(this.#retryDelayMs * 2 ** attempt);
          continue;
        }
        const message = error instanceof Error ? error.message : String(error);
        return { ok: false, error: { status: 0, message } };
      }

      for (const interceptor of this.#responseInterceptors) {
        response = await interceptor(response, context);
      }

      const payload = await readPayload(response);
      if (response.ok) {
        return { ok: true, status: response.status, data: payload as T };
      }
      if (attempt < this.#retries && isRetryable(response.status)) {
        await sleep(this.#retryDelayMs * 2 ** attempt);
        continue;
      }
      const message = response.statusText || `HTTP ${response.status}`;
      return { ok: false, error: { status: response.status as E, message, payload } };
    }
  }
"#;
